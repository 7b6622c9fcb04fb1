use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use futures::FutureExt as _;
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use lesson_utils::{
    Category, ContentCatalog, FeedbackKey, FeedbackRecord, Illustration, PromptId, ResponseEntry,
    ResponseId, WordEntry,
};
use proptest::prelude::*;
use quiz_frontend_rs::{
    CatalogFeedbackResolver, FeedbackResolver, Phase, Remarks, Summary, ValidationResult,
    VerbMatchSession,
};

fn lesson_catalog() -> Arc<ContentCatalog> {
    Arc::new(lesson_utils::lesson_pack::verb_master().unwrap())
}

fn lesson_session() -> VerbMatchSession<CatalogFeedbackResolver> {
    let catalog = lesson_catalog();
    let resolver = CatalogFeedbackResolver::new(Arc::clone(&catalog), Remarks::default());
    VerbMatchSession::new(catalog, resolver)
}

fn by_numeric_id(words: &mut [WordEntry]) {
    words.sort_by_key(|word| word.id.0.parse::<u32>().unwrap());
}

fn order(sequence: &[WordEntry]) -> Vec<PromptId> {
    sequence.iter().map(|word| word.id.clone()).collect()
}

fn word(id: &str, text: &str, verbs: &[&str]) -> WordEntry {
    WordEntry {
        id: id.into(),
        display_text: text.to_string(),
        transliteration: text.to_string(),
        illustration: Illustration::Emoji("❓".to_string()),
        category: Category::Object,
        acceptable_response_ids: verbs.iter().copied().map(ResponseId::from).collect(),
    }
}

fn verb(id: &str, text: &str) -> ResponseEntry {
    ResponseEntry {
        id: id.into(),
        display_text: text.to_string(),
        transliteration: text.to_string(),
    }
}

/// Hands out explanations only when the test says so.
#[derive(Clone, Default)]
struct ManualResolver {
    waiting: Rc<RefCell<Vec<oneshot::Sender<ValidationResult>>>>,
}

impl ManualResolver {
    fn answer(&self, index: usize, remark: &str) {
        let sender = self.waiting.borrow_mut().remove(index);
        sender
            .send(ValidationResult::settled(true, remark))
            .unwrap();
    }
}

impl FeedbackResolver for ManualResolver {
    fn resolve(
        &self,
        _prompt: &PromptId,
        _response: &ResponseId,
        is_correct: bool,
    ) -> LocalBoxFuture<'static, ValidationResult> {
        let (sender, receiver) = oneshot::channel();
        self.waiting.borrow_mut().push(sender);
        receiver
            .map(move |result| result.unwrap_or_else(|_| ValidationResult::pending(is_correct)))
            .boxed_local()
    }
}

#[test]
fn test_correct_verb_scores_and_shows_its_record() {
    let mut session = lesson_session();
    session.start_with_order(by_numeric_id);
    let word = session.current_prompt().unwrap().clone();
    assert_eq!(word.id, PromptId::from("1"));
    for verb in ["v5", "v6", "v7"] {
        assert!(word.acceptable_response_ids.contains(&ResponseId::from(verb)));
    }

    let pending = session.select_response(&"v6".into()).unwrap();
    assert_eq!(session.state().score, 1);
    assert!(session.state().last_result.unwrap().is_correct);

    let result = block_on(pending.explanation);
    assert!(session.apply_feedback(&pending.ticket, result));
    let shown = session.state().last_result.unwrap();
    assert_eq!(shown.remark, "Harika! Kitap okunur.");
    assert_eq!(shown.example_sentence, "本を読みます。");
    assert_eq!(shown.transliterated_sentence, "Hon o yomimasu.");
}

#[test]
fn test_wrong_verb_presents_the_same_word_again() {
    let mut session = lesson_session();
    session.start_with_order(by_numeric_id);

    let pending = session.select_response(&"v1".into()).unwrap();
    assert!(!session.state().last_result.unwrap().is_correct);
    let result = block_on(pending.explanation);
    assert!(session.apply_feedback(&pending.ticket, result));

    assert!(session.advance());
    let state = session.state();
    assert_eq!(state.phase, Phase::Presenting);
    assert_eq!(state.position, 0);
    assert_eq!(state.score, 0);
    assert_eq!(session.current_prompt().unwrap().id, PromptId::from("1"));
}

#[test]
fn test_three_word_round_ends_with_full_marks() {
    let catalog = ContentCatalog::new(
        vec![
            word("a", "水", &["drink"]),
            word("b", "パン", &["eat"]),
            word("c", "本", &["read"]),
        ],
        vec![verb("drink", "飲みます"), verb("eat", "食べます"), verb("read", "読みます")],
        [(
            FeedbackKey::new(&"a".into(), &"drink".into()),
            FeedbackRecord {
                remark: "Su içilir.".to_string(),
                example_sentence: "水を飲みます。".to_string(),
                transliterated_sentence: "Mizu o nomimasu.".to_string(),
            },
        )],
    )
    .unwrap();
    let catalog = Arc::new(catalog);
    let resolver = CatalogFeedbackResolver::new(Arc::clone(&catalog), Remarks::default());
    let mut session = VerbMatchSession::new(catalog, resolver);
    session.start(17);

    for advances in 1..=3 {
        let word = session.current_prompt().unwrap().clone();
        let verb = word.acceptable_response_ids.first().unwrap().clone();
        let pending = session.select_response(&verb).unwrap();
        let result = block_on(pending.explanation);
        session.apply_feedback(&pending.ticket, result);
        assert!(session.advance());
        if advances < 3 {
            assert_eq!(session.state().phase, Phase::Presenting);
            assert!(session.summary().is_none());
        }
    }

    assert_eq!(session.state().phase, Phase::Finished);
    assert_eq!(session.summary(), Some(Summary { score: 3, total: 3 }));
    assert!(session.current_prompt().is_none());
}

#[test]
fn test_missing_record_falls_back_to_a_generic_positive() {
    let resolver = CatalogFeedbackResolver::new(lesson_catalog(), Remarks::default());
    let result = block_on(resolver.resolve(&"1".into(), &"v99".into(), true));
    assert!(result.is_correct);
    assert!(!result.is_pending);
    assert!(!result.remark.is_empty());
}

#[test]
fn test_late_explanation_does_not_overwrite_the_next_attempt() {
    let resolver = ManualResolver::default();
    let mut session = VerbMatchSession::new(lesson_catalog(), resolver.clone());
    session.start_with_order(by_numeric_id);

    let first = session.select_response(&"v1".into()).unwrap();
    assert!(session.advance());
    let second = session.select_response(&"v6".into()).unwrap();

    resolver.answer(0, "for v1");
    let late = block_on(first.explanation);
    assert!(!session.apply_feedback(&first.ticket, late));
    let shown = session.state().last_result.unwrap();
    assert!(shown.is_pending);
    assert!(shown.is_correct);

    resolver.answer(0, "for v6");
    let fresh = block_on(second.explanation);
    assert!(session.apply_feedback(&second.ticket, fresh));
    assert_eq!(session.state().last_result.unwrap().remark, "for v6");
}

#[test]
fn test_retrying_the_same_verb_still_discards_the_old_explanation() {
    let resolver = ManualResolver::default();
    let mut session = VerbMatchSession::new(lesson_catalog(), resolver.clone());
    session.start_with_order(by_numeric_id);

    let first = session.select_response(&"v1".into()).unwrap();
    session.advance();
    let _second = session.select_response(&"v1".into()).unwrap();

    resolver.answer(0, "stale");
    let late = block_on(first.explanation);
    assert!(!session.apply_feedback(&first.ticket, late));
    assert!(session.state().last_result.unwrap().is_pending);
}

#[test]
fn test_advancing_before_the_explanation_arrives_keeps_the_point() {
    let resolver = ManualResolver::default();
    let mut session = VerbMatchSession::new(lesson_catalog(), resolver.clone());
    session.start_with_order(by_numeric_id);

    let pending = session.select_response(&"v6".into()).unwrap();
    assert!(session.advance());
    assert_eq!(session.state().position, 1);

    resolver.answer(0, "too late");
    let late = block_on(pending.explanation);
    assert!(!session.apply_feedback(&pending.ticket, late));

    let state = session.state();
    assert_eq!(state.phase, Phase::Presenting);
    assert_eq!(state.score, 1);
    assert!(state.last_result.is_none());
}

#[test]
fn test_reset_discards_everything_in_flight() {
    let resolver = ManualResolver::default();
    let mut session = VerbMatchSession::new(lesson_catalog(), resolver.clone());
    session.start(4);

    let pending = session.select_response(&"v6".into()).unwrap();
    session.reset();
    assert_eq!(session.state().phase, Phase::NotStarted);

    resolver.answer(0, "ignored");
    let late = block_on(pending.explanation);
    assert!(!session.apply_feedback(&pending.ticket, late));
    assert!(session.state().last_result.is_none());
}

#[test]
fn test_restart_after_finishing_starts_a_fresh_round() {
    let mut session = lesson_session();
    let first = session.start(1);
    while let Some(word) = session.current_prompt().cloned() {
        let verb = word.acceptable_response_ids.first().unwrap().clone();
        session.select_response(&verb).unwrap();
        assert!(session.advance());
    }
    let total = first.sequence.len();
    assert_eq!(session.summary(), Some(Summary { score: total, total }));

    let restarted = session.start(2);
    assert_eq!(restarted.phase, Phase::Presenting);
    assert_eq!(restarted.position, 0);
    assert_eq!(restarted.score, 0);
    assert!(restarted.selected_response.is_none());
    assert!(restarted.last_result.is_none());
    assert!(session.summary().is_none());

    assert_ne!(order(&restarted.sequence), order(&first.sequence));
    let mut ids = order(&restarted.sequence);
    ids.sort();
    let mut expected = order(session.catalog().list_prompts());
    expected.sort();
    assert_eq!(ids, expected);
}

#[derive(Clone, Debug)]
enum Action {
    Select(usize),
    Advance,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![(0usize..9).prop_map(Action::Select), Just(Action::Advance)]
}

proptest! {
    #[test]
    fn test_score_only_ever_grows(seed in any::<u64>(), actions in prop::collection::vec(action(), 0..200)) {
        let mut session = lesson_session();
        session.start(seed);
        let total = session.state().sequence.len();
        let verbs = session.catalog().list_responses().to_vec();
        let mut credited = vec![0usize; total];

        for action in actions {
            let before = session.state();
            match action {
                Action::Select(index) => {
                    let _ = session.select_response(&verbs[index % verbs.len()].id);
                }
                Action::Advance => {
                    session.advance();
                }
            }
            let after = session.state();
            prop_assert!(after.score >= before.score);
            prop_assert!(after.score <= total);
            if after.score > before.score {
                prop_assert_eq!(after.score, before.score + 1);
                credited[before.position] += 1;
            }
        }

        prop_assert!(credited.iter().all(|&points| points <= 1));
    }

    #[test]
    fn test_wrong_attempts_never_add_points(seed in any::<u64>(), wrong_attempts in 0usize..6) {
        let mut session = lesson_session();
        session.start(seed);
        let word = session.current_prompt().unwrap().clone();
        let (right, wrong): (Vec<_>, Vec<_>) = session
            .catalog()
            .list_responses()
            .iter()
            .map(|verb| verb.id.clone())
            .partition(|id| word.acceptable_response_ids.contains(id));
        prop_assume!(!wrong.is_empty());

        for attempt in 0..wrong_attempts {
            session.select_response(&wrong[attempt % wrong.len()]).unwrap();
            session.advance();
            prop_assert_eq!(session.state().score, 0);
            prop_assert_eq!(session.state().position, 0);
        }
        session.select_response(&right[0]).unwrap();
        prop_assert_eq!(session.state().score, 1);
    }
}
