//! The exported quizzes, driven the way the web app drives them.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use lesson_utils::Bucket;
use lesson_utils::lesson_pack::FlashcardTopic;
use quiz_frontend_rs::{
    ClassifierQuiz, FlashcardBrowser, Phase, QuizConfig, ReviewQuiz, VerbMatchQuiz,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn verb_match_shows_the_written_explanation() {
    let quiz = VerbMatchQuiz::new(None, None).unwrap();
    let state = quiz.start_session(Some(1));
    assert_eq!(state.phase, Phase::Presenting);

    let word = quiz.get_current_prompt().unwrap();
    let verb = word.acceptable_response_ids.first().unwrap().0.clone();
    assert!(quiz.select_response(verb).await);

    let state = quiz.get_state();
    assert_eq!(state.score, 1);
    let shown = state.last_result.unwrap();
    assert!(!shown.is_pending);
    assert!(!shown.remark.is_empty());
}

#[wasm_bindgen_test]
fn bad_catalog_is_rejected() {
    assert!(VerbMatchQuiz::new(Some("{\"prompts\": []}".to_string()), None).is_err());
}

#[wasm_bindgen_test]
async fn classifier_moves_on_by_itself() {
    let config = QuizConfig {
        auto_advance_delay_ms: 10,
        ..QuizConfig::default()
    };
    let quiz = ClassifierQuiz::new(None, Some(config)).unwrap();
    quiz.start_session(Some(2));

    let item = quiz.get_current_item().unwrap();
    let wrong = match item.bucket {
        Bucket::First => Bucket::Second,
        Bucket::Second => Bucket::First,
    };
    assert!(quiz.select(wrong).await.unwrap());
    assert_eq!(quiz.get_state().position, 1);
    assert_eq!(quiz.get_state().phase, Phase::Presenting);
}

#[wasm_bindgen_test]
fn review_reveals_the_answer() {
    let quiz = ReviewQuiz::new(None, None).unwrap();
    quiz.start_session(None);
    assert!(quiz.select_option("ノート".to_string()));
    assert_eq!(quiz.correct_answer().as_deref(), Some("本"));
    assert!(quiz.advance());
}

#[wasm_bindgen_test]
fn flashcards_page_both_ways() {
    let mut browser = FlashcardBrowser::new(FlashcardTopic::FoodDrink).unwrap();
    assert!(browser.is_first());
    assert!(browser.next());
    assert!(browser.prev());
    assert!(!browser.prev());
}

#[wasm_bindgen_test]
fn unsubscribed_listener_can_be_dropped_once() {
    let quiz = ReviewQuiz::new(None, None).unwrap();
    let key = quiz.subscribe(js_sys::Function::new_no_args(""));
    assert!(quiz.unsubscribe(key));
    assert!(!quiz.unsubscribe(key));
    quiz.start_session(None);
}
