use std::sync::Arc;

use futures::future::LocalBoxFuture;
use lesson_utils::{ContentCatalog, PromptId, ResponseEntry, ResponseId, WordEntry};

use crate::audio::SoundCue;
use crate::engine::{AdvancePolicy, RoundEngine, SessionState, Summary, Ticket};
use crate::feedback::{FeedbackResolver, ValidationResult};
use crate::utils::shuffled;

pub type VerbMatchState = SessionState<WordEntry, ResponseEntry>;

/// Identifies the prompt/response pair an explanation was requested for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackTicket {
    ticket: Ticket,
    prompt: PromptId,
    response: ResponseId,
}

/// An explanation that is still being resolved.
///
/// Await `explanation`, then hand the result back with [`VerbMatchSession::apply_feedback`].
/// Don't hold a borrow of the session across that await.
pub struct PendingFeedback {
    pub ticket: FeedbackTicket,
    pub cue: SoundCue,
    pub explanation: LocalBoxFuture<'static, ValidationResult>,
}

/// The verb-matching game: match every word in the catalog with a verb that fits it.
///
/// Wrong answers are retried until the word is matched, so a perfect round scores
/// one point per word and a round never scores more than that.
pub struct VerbMatchSession<F> {
    catalog: Arc<ContentCatalog>,
    resolver: F,
    engine: RoundEngine<WordEntry, ResponseEntry>,
}

impl<F: FeedbackResolver> VerbMatchSession<F> {
    pub fn new(catalog: Arc<ContentCatalog>, resolver: F) -> Self {
        Self {
            catalog,
            resolver,
            engine: RoundEngine::new(AdvancePolicy::RetryOnWrong),
        }
    }

    /// Starts a round over the whole catalog in a random order derived from `seed`.
    pub fn start(&mut self, seed: u64) -> VerbMatchState {
        let sequence = shuffled(self.catalog.list_prompts(), seed);
        self.start_with_sequence(sequence)
    }

    /// Starts a round in whatever order `arrange` leaves the catalog's words in.
    pub fn start_with_order(&mut self, arrange: impl FnOnce(&mut [WordEntry])) -> VerbMatchState {
        let mut sequence = self.catalog.list_prompts().to_vec();
        arrange(&mut sequence);
        self.start_with_sequence(sequence)
    }

    fn start_with_sequence(&mut self, sequence: Vec<WordEntry>) -> VerbMatchState {
        if self.engine.start(sequence) {
            log::info!("Verb match started with {} words", self.engine.total());
        }
        self.state()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Grades the verb with id `response_id` against the current word.
    ///
    /// Returns the still-running explanation lookup, or `None` if the selection was
    /// ignored (nothing being presented, or an id that is not in the catalog).
    pub fn select_response(&mut self, response_id: &ResponseId) -> Option<PendingFeedback> {
        let Some(response) = self.catalog.response(response_id).cloned() else {
            log::warn!("Ignoring selection of unknown verb {response_id}");
            return None;
        };
        let selection = self
            .engine
            .select(response, |_, _, is_correct| ValidationResult::pending(is_correct))?;

        let prompt = self.engine.current_prompt()?.id.clone();
        let explanation = self
            .resolver
            .resolve(&prompt, response_id, selection.is_correct);

        Some(PendingFeedback {
            ticket: FeedbackTicket {
                ticket: selection.ticket,
                prompt,
                response: response_id.clone(),
            },
            cue: selection.cue,
            explanation,
        })
    }

    /// Shows a resolved explanation, unless the learner has moved on since it was requested.
    pub fn apply_feedback(&mut self, ticket: &FeedbackTicket, result: ValidationResult) -> bool {
        let same_pair = self
            .engine
            .current_prompt()
            .is_some_and(|prompt| prompt.id == ticket.prompt)
            && self
                .engine
                .selected()
                .is_some_and(|response| response.id == ticket.response);
        if !same_pair {
            log::debug!(
                "Discarding feedback for {}-{}, no longer on screen",
                ticket.prompt,
                ticket.response
            );
            return false;
        }
        self.engine.settle(ticket.ticket, result)
    }

    pub fn advance(&mut self) -> bool {
        let advanced = self.engine.advance();
        if let Some(summary) = self.engine.summary().filter(|_| advanced) {
            log::info!("Verb match finished: {}/{}", summary.score, summary.total);
        }
        advanced
    }

    pub fn current_prompt(&self) -> Option<&WordEntry> {
        self.engine.current_prompt()
    }

    pub fn state(&self) -> VerbMatchState {
        self.engine.snapshot()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.engine.summary()
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Remarks;
    use crate::engine::Phase;
    use crate::feedback::CatalogFeedbackResolver;
    use futures::executor::block_on;

    fn session() -> VerbMatchSession<CatalogFeedbackResolver> {
        let catalog = Arc::new(lesson_utils::lesson_pack::verb_master().unwrap());
        let resolver = CatalogFeedbackResolver::new(Arc::clone(&catalog), Remarks::default());
        VerbMatchSession::new(catalog, resolver)
    }

    #[test]
    fn start_covers_the_whole_catalog() {
        let mut session = session();
        let state = session.start(3);
        assert_eq!(state.phase, Phase::Presenting);
        assert_eq!(state.position, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.sequence.len(), session.catalog().list_prompts().len());

        let mut ids: Vec<_> = state.sequence.iter().map(|w| w.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<_> = session
            .catalog()
            .list_prompts()
            .iter()
            .map(|w| w.id.clone())
            .collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn unknown_verb_is_ignored() {
        let mut session = session();
        session.start(1);
        assert!(session.select_response(&"v99".into()).is_none());
        assert_eq!(session.state().phase, Phase::Presenting);
        assert!(session.state().selected_response.is_none());
    }

    #[test]
    fn pending_result_is_replaced_when_the_explanation_arrives() {
        let mut session = session();
        session.start_with_order(|words| words.sort_by_key(|w| w.id.0.parse::<u32>().unwrap()));
        assert_eq!(session.current_prompt().unwrap().id.0, "1");

        let pending = session.select_response(&"v6".into()).unwrap();
        assert_eq!(pending.cue, SoundCue::Correct);
        let shown = session.state().last_result.unwrap();
        assert!(shown.is_pending);
        assert!(shown.is_correct);

        let result = block_on(pending.explanation);
        assert!(session.apply_feedback(&pending.ticket, result));
        let shown = session.state().last_result.unwrap();
        assert!(!shown.is_pending);
        assert_eq!(shown.example_sentence, "本を読みます。");
    }

    #[test]
    fn restart_is_only_allowed_once_finished() {
        let mut session = session();
        session.start(5);
        let position_before = session.state().position;
        session.start(6);
        assert_eq!(session.state().position, position_before);
        assert_eq!(session.state().phase, Phase::Presenting);
    }
}
