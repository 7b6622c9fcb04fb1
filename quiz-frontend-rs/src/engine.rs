//! The round engine every quiz in the app is built on.
//!
//! A round walks a fixed sequence of prompts:
//!
//! ```text
//! NotStarted -> Presenting -> Validating -> ShowingFeedback -> Presenting | Finished
//! ```
//!
//! The verdict and the score are decided synchronously inside [`RoundEngine::select`].
//! Anything that arrives later (an explanation, an auto-advance timer) carries a
//! [`Ticket`] and is only applied if the round is still where it was when the ticket
//! was issued. Events that are not legal in the current phase are ignored: the UI can
//! deliver double taps and late timers, and none of them should be able to corrupt a round.

use crate::audio::SoundCue;
use crate::feedback::ValidationResult;
use crate::validator::Gradable;

#[derive(
    Clone, Copy, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq, Eq, Hash,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    Presenting,
    Validating,
    ShowingFeedback,
    Finished,
}

/// What `advance` does after a wrong answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Stay on the same prompt until it is answered correctly.
    RetryOnWrong,
    /// Move on regardless of the verdict.
    AlwaysForward,
}

/// Identifies one selection. Only valid until the round moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    position: usize,
}

impl Ticket {
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub ticket: Ticket,
    pub is_correct: bool,
    pub cue: SoundCue,
}

#[derive(
    Clone, Copy, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq, Eq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
}

/// Read-only snapshot of a round, for rendering.
#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct SessionState<P, R> {
    pub phase: Phase,
    pub sequence: Vec<P>,
    pub position: usize,
    pub score: usize,
    pub selected_response: Option<R>,
    pub last_result: Option<ValidationResult>,
}

#[derive(Clone, Debug)]
pub struct RoundEngine<P, R> {
    phase: Phase,
    sequence: Vec<P>,
    position: usize,
    score: usize,
    // whether the prompt at `position` has already earned its point
    credited: bool,
    selected: Option<R>,
    last_result: Option<ValidationResult>,
    // bumped on every transition that invalidates outstanding tickets
    generation: u64,
    policy: AdvancePolicy,
}

impl<P, R> RoundEngine<P, R>
where
    P: Gradable<R>,
{
    pub fn new(policy: AdvancePolicy) -> Self {
        Self {
            phase: Phase::NotStarted,
            sequence: Vec::new(),
            position: 0,
            score: 0,
            credited: false,
            selected: None,
            last_result: None,
            generation: 0,
            policy,
        }
    }

    /// Begins a new round over `sequence`. Only legal before the first round or after one finished.
    pub fn start(&mut self, sequence: Vec<P>) -> bool {
        if !matches!(self.phase, Phase::NotStarted | Phase::Finished) {
            log::debug!("Ignoring start while {:?}", self.phase);
            return false;
        }
        let next = if sequence.is_empty() {
            Phase::Finished
        } else {
            Phase::Presenting
        };
        self.sequence = sequence;
        self.position = 0;
        self.score = 0;
        self.credited = false;
        self.selected = None;
        self.last_result = None;
        self.generation += 1;
        self.transition(next);
        true
    }

    /// Drops the round entirely, e.g. when the learner navigates away.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.position = 0;
        self.score = 0;
        self.credited = false;
        self.selected = None;
        self.last_result = None;
        self.generation += 1;
        self.transition(Phase::NotStarted);
    }

    /// Grades `response` against the current prompt and shows `feedback`'s result for it.
    ///
    /// The score is final once this returns. Returns `None` (and changes nothing) unless
    /// a prompt is being presented.
    pub fn select(
        &mut self,
        response: R,
        feedback: impl FnOnce(&P, &R, bool) -> ValidationResult,
    ) -> Option<Selection> {
        if self.phase != Phase::Presenting {
            log::debug!("Ignoring selection while {:?}", self.phase);
            return None;
        }
        let prompt = self.sequence.get(self.position)?;
        let is_correct = prompt.is_answered_by(&response);
        let result = feedback(prompt, &response, is_correct);

        self.selected = Some(response);
        self.transition(Phase::Validating);

        if is_correct && !self.credited {
            self.score += 1;
            self.credited = true;
        }
        self.last_result = Some(result);
        self.generation += 1;
        self.transition(Phase::ShowingFeedback);

        Some(Selection {
            ticket: Ticket {
                generation: self.generation,
                position: self.position,
            },
            is_correct,
            cue: SoundCue::for_verdict(is_correct),
        })
    }

    /// Whether the selection behind `ticket` is still the one on screen.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.phase == Phase::ShowingFeedback
            && self.generation == ticket.generation
            && self.position == ticket.position
    }

    /// Replaces the shown result with a late-arriving one.
    ///
    /// Dropped if the round has moved on since the ticket was issued. The verdict
    /// itself never changes: `result.is_correct` is overwritten with the one decided at selection.
    pub fn settle(&mut self, ticket: Ticket, mut result: ValidationResult) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale feedback for position {}", ticket.position);
            return false;
        }
        let Some(current) = self.last_result.as_mut() else {
            return false;
        };
        result.is_correct = current.is_correct;
        *current = result;
        true
    }

    /// Leaves the feedback screen.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::ShowingFeedback {
            log::debug!("Ignoring advance while {:?}", self.phase);
            return false;
        }
        let was_correct = self
            .last_result
            .as_ref()
            .is_some_and(|result| result.is_correct);
        self.selected = None;
        self.last_result = None;
        self.generation += 1;

        if !was_correct && self.policy == AdvancePolicy::RetryOnWrong {
            self.transition(Phase::Presenting);
        } else if self.position + 1 >= self.sequence.len() {
            self.transition(Phase::Finished);
        } else {
            self.position += 1;
            self.credited = false;
            self.transition(Phase::Presenting);
        }
        true
    }

    /// `advance`, but only if `ticket`'s selection is still on screen.
    pub fn advance_if_current(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Ignoring expired advance for position {}", ticket.position);
            return false;
        }
        self.advance()
    }

    fn transition(&mut self, next: Phase) {
        log::debug!("{:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    pub fn sequence(&self) -> &[P] {
        &self.sequence
    }

    pub fn current_prompt(&self) -> Option<&P> {
        match self.phase {
            Phase::Presenting | Phase::Validating | Phase::ShowingFeedback => {
                self.sequence.get(self.position)
            }
            Phase::NotStarted | Phase::Finished => None,
        }
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    pub fn summary(&self) -> Option<Summary> {
        (self.phase == Phase::Finished).then(|| Summary {
            score: self.score,
            total: self.total(),
        })
    }

    pub fn snapshot(&self) -> SessionState<P, R>
    where
        P: Clone,
        R: Clone,
    {
        SessionState {
            phase: self.phase,
            sequence: self.sequence.clone(),
            position: self.position,
            score: self.score,
            selected_response: self.selected.clone(),
            last_result: self.last_result.clone(),
        }
    }
}
