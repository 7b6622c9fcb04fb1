use std::sync::Arc;

use lesson_utils::{ReviewDeck, ReviewQuestion};

use crate::config::QuizConfig;
use crate::engine::{AdvancePolicy, RoundEngine, SessionState, Selection, Summary};
use crate::feedback::ValidationResult;
use crate::utils::shuffled;

pub type ReviewState = SessionState<ReviewQuestion, String>;

/// Multiple-choice review of the lesson. One attempt per question; a wrong answer
/// reveals the right one and the learner moves on when ready.
pub struct ReviewSession {
    deck: Arc<ReviewDeck>,
    config: QuizConfig,
    engine: RoundEngine<ReviewQuestion, String>,
}

impl ReviewSession {
    pub fn new(deck: Arc<ReviewDeck>, config: QuizConfig) -> Self {
        Self {
            deck,
            config,
            engine: RoundEngine::new(AdvancePolicy::AlwaysForward),
        }
    }

    /// `seed` only matters when the config asks for shuffled questions.
    pub fn start(&mut self, seed: u64) -> ReviewState {
        let questions = if self.config.shuffle_review {
            shuffled(self.deck.questions(), seed)
        } else {
            self.deck.questions().to_vec()
        };
        self.engine.start(questions);
        self.state()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn select_option(&mut self, option: impl Into<String>) -> Option<Selection> {
        let remarks = &self.config.remarks;
        self.engine.select(option.into(), |question, _, is_correct| {
            let remark = if is_correct {
                remarks.review_correct.clone()
            } else {
                remarks.review_wrong_for(&question.correct_answer)
            };
            ValidationResult::settled(is_correct, remark)
        })
    }

    pub fn advance(&mut self) -> bool {
        self.engine.advance()
    }

    /// The right option for the question on screen, once the learner has answered it.
    pub fn correct_answer(&self) -> Option<&str> {
        self.engine
            .last_result()
            .and(self.engine.current_prompt())
            .map(|question| question.correct_answer.as_str())
    }

    pub fn current_question(&self) -> Option<&ReviewQuestion> {
        self.engine.current_prompt()
    }

    pub fn state(&self) -> ReviewState {
        self.engine.snapshot()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.engine.summary()
    }
}
