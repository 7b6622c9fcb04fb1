pub mod catalog;
pub mod decks;
pub mod lesson_pack;

use std::collections::BTreeSet;

use parse_display::{Display, FromStr};

pub use catalog::{CatalogError, CatalogFixture, ContentCatalog};
pub use decks::{
    Bucket, ClassificationDeck, ClassifyItem, FlashCard, FlashcardDeck, QuestionKind,
    ReviewDeck, ReviewOption, ReviewQuestion,
};

/// Identifier of a prompt (a word card). Unique within a catalog.
#[derive(
    Clone,
    Debug,
    Display,
    FromStr,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[display("{0}")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct PromptId(pub String);

/// Identifier of a response (a verb tile). Unique within a catalog.
#[derive(
    Clone,
    Debug,
    Display,
    FromStr,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[display("{0}")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ResponseId(pub String);

impl From<&str> for PromptId {
    fn from(id: &str) -> Self {
        PromptId(id.to_string())
    }
}

impl From<&str> for ResponseId {
    fn from(id: &str) -> Self {
        ResponseId(id.to_string())
    }
}

/// Composite key of the feedback table. Written as `"<prompt>-<response>"`,
/// e.g. `"1-v6"`; the prompt part must not itself contain a `-`.
#[derive(Clone, Debug, Display, FromStr, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[display("{prompt}-{response}")]
pub struct FeedbackKey {
    pub prompt: PromptId,
    pub response: ResponseId,
}

impl FeedbackKey {
    pub fn new(prompt: &PromptId, response: &ResponseId) -> Self {
        Self {
            prompt: prompt.clone(),
            response: response.clone(),
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Object,
    Time,
    Place,
}

/// What the card shows next to the word: an emoji glyph or a picture.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Hash,
    Eq,
    PartialEq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Illustration {
    Emoji(String),
    ImageUrl(String),
}

/// A prompt of the verb-matching game.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Eq,
    PartialEq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: PromptId,
    pub display_text: String,
    pub transliteration: String,
    pub illustration: Illustration,
    pub category: Category,
    /// The verbs that make sense with this word.
    pub acceptable_response_ids: BTreeSet<ResponseId>,
}

#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Eq,
    PartialEq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub id: ResponseId,
    pub display_text: String,
    pub transliteration: String,
}

/// Hand-written explanation for a correct prompt/response pair.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    tsify::Tsify,
    Eq,
    PartialEq,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub remark: String,
    pub example_sentence: String,
    pub transliterated_sentence: String,
}
