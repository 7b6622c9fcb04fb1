use std::sync::Arc;

use lesson_utils::{Bucket, ClassificationDeck, ClassifyItem};

use crate::audio::SoundCue;
use crate::config::QuizConfig;
use crate::engine::{AdvancePolicy, RoundEngine, SessionState, Summary, Ticket};
use crate::feedback::ValidationResult;
use crate::utils::shuffled;

pub type ClassifierState = SessionState<ClassifyItem, Bucket>;

/// Returned by a selection: after `delay_ms`, pass `ticket` to
/// [`ClassifierSession::complete_display`] to move on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoAdvance {
    pub ticket: Ticket,
    pub delay_ms: u32,
    pub cue: SoundCue,
}

/// Sort every item of the deck into one of its two buckets.
///
/// There is no "next" button: the verdict is shown for a moment and then the
/// next item comes up, right or wrong.
pub struct ClassifierSession {
    deck: Arc<ClassificationDeck>,
    config: QuizConfig,
    engine: RoundEngine<ClassifyItem, Bucket>,
}

impl ClassifierSession {
    pub fn new(deck: Arc<ClassificationDeck>, config: QuizConfig) -> Self {
        Self {
            deck,
            config,
            engine: RoundEngine::new(AdvancePolicy::AlwaysForward),
        }
    }

    pub fn start(&mut self, seed: u64) -> ClassifierState {
        self.engine.start(shuffled(self.deck.items(), seed));
        self.state()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn select(&mut self, bucket: Bucket) -> Option<AutoAdvance> {
        let remarks = &self.config.remarks;
        let selection = self.engine.select(bucket, |_, _, is_correct| {
            ValidationResult::settled(
                is_correct,
                if is_correct {
                    &remarks.classified_correctly
                } else {
                    &remarks.classified_wrongly
                },
            )
        })?;
        Some(AutoAdvance {
            ticket: selection.ticket,
            delay_ms: self.config.auto_advance_delay_ms,
            cue: selection.cue,
        })
    }

    /// The verdict has been on screen long enough. Ignored if the round was reset meanwhile.
    pub fn complete_display(&mut self, ticket: Ticket) -> bool {
        self.engine.advance_if_current(ticket)
    }

    pub fn current_item(&self) -> Option<&ClassifyItem> {
        self.engine.current_prompt()
    }

    pub fn deck(&self) -> &ClassificationDeck {
        &self.deck
    }

    pub fn state(&self) -> ClassifierState {
        self.engine.snapshot()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.engine.summary()
    }
}
