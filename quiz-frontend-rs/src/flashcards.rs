use std::sync::Arc;

use lesson_utils::{FlashCard, FlashcardDeck};

/// Pages through a flashcard deck. Nothing is graded; the ends of the deck don't wrap.
#[derive(Clone, Debug)]
pub struct FlashcardViewer {
    deck: Arc<FlashcardDeck>,
    index: usize,
}

impl FlashcardViewer {
    pub fn new(deck: Arc<FlashcardDeck>) -> Self {
        Self { deck, index: 0 }
    }

    pub fn title(&self) -> &str {
        self.deck.title()
    }

    pub fn current(&self) -> Option<&FlashCard> {
        self.deck.cards().get(self.index)
    }

    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.deck.cards().len()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total()
    }
}
