//! The N5 lesson that ships with the app: food, drink, time words and the
//! handful of verbs that go with them.
//!
//! Hosts are free to load any other catalog; these are just the defaults.

use crate::{CatalogError, ClassificationDeck, ContentCatalog, FlashcardDeck, ReviewDeck};

const VERB_MASTER: &str = include_str!("../data/verb_master.json");
const TABEMASU_MATCH: &str = include_str!("../data/tabemasu_match.json");
const REVIEW: &str = include_str!("../data/review.json");
const FOOD_DRINK: &str = include_str!("../data/food_drink.json");
const TIME_WORDS: &str = include_str!("../data/time_words.json");
const SIMPLE_VERBS: &str = include_str!("../data/simple_verbs.json");

#[derive(
    Clone, Copy, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum FlashcardTopic {
    FoodDrink,
    TimeWords,
    SimpleVerbs,
}

/// Words to match against the verb grid, with the hand-written feedback table.
pub fn verb_master() -> Result<ContentCatalog, CatalogError> {
    ContentCatalog::from_json(VERB_MASTER)
}

/// 食べます / 飲みます sorting.
pub fn tabemasu_match() -> Result<ClassificationDeck, CatalogError> {
    ClassificationDeck::from_json(TABEMASU_MATCH)
}

pub fn review() -> Result<ReviewDeck, CatalogError> {
    ReviewDeck::from_json(REVIEW)
}

pub fn flashcards(topic: FlashcardTopic) -> Result<FlashcardDeck, CatalogError> {
    let json = match topic {
        FlashcardTopic::FoodDrink => FOOD_DRINK,
        FlashcardTopic::TimeWords => TIME_WORDS,
        FlashcardTopic::SimpleVerbs => SIMPLE_VERBS,
    };
    FlashcardDeck::from_json(json)
}
