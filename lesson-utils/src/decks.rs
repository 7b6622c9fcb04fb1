//! Content for the smaller lesson modules: the two-bucket classifier, the
//! multiple-choice review and the flashcard decks.
//!
//! Every deck is validated when it is built, the same way [`ContentCatalog`](crate::ContentCatalog) is.

use crate::Illustration;
use crate::catalog::{CatalogError, ensure_unique_ids};

#[derive(
    Clone,
    Copy,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    tsify::Tsify,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    First,
    Second,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct BucketLabel {
    pub display_text: String,
    pub transliteration: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyItem {
    pub id: String,
    pub display_text: String,
    pub transliteration: String,
    pub illustration: Illustration,
    pub bucket: Bucket,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationDeckFixture {
    first: BucketLabel,
    second: BucketLabel,
    items: Vec<ClassifyItem>,
}

/// Items to sort into exactly two buckets, e.g. "eaten" (食べます) vs "drunk" (飲みます).
#[derive(Clone, Debug)]
pub struct ClassificationDeck {
    first: BucketLabel,
    second: BucketLabel,
    items: Vec<ClassifyItem>,
}

impl ClassificationDeck {
    pub fn new(
        first: BucketLabel,
        second: BucketLabel,
        items: Vec<ClassifyItem>,
    ) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty("items"));
        }
        ensure_unique_ids("items", items.iter().map(|item| item.id.as_str()))?;
        Ok(Self {
            first,
            second,
            items,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: ClassificationDeckFixture = serde_json::from_str(json)?;
        Self::new(fixture.first, fixture.second, fixture.items)
    }

    pub fn label(&self, bucket: Bucket) -> &BucketLabel {
        match bucket {
            Bucket::First => &self.first,
            Bucket::Second => &self.second,
        }
    }

    pub fn items(&self) -> &[ClassifyItem] {
        &self.items
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    Vocabulary,
    Demonstrative,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOption {
    pub text: String,
    pub transliteration: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuestion {
    pub id: String,
    pub kind: QuestionKind,
    pub question_text: String,
    pub transliterated_question: String,
    pub meaning: String,
    pub illustration: Illustration,
    /// Text of the one correct option.
    pub correct_answer: String,
    pub options: Vec<ReviewOption>,
}

#[derive(Clone, Debug)]
pub struct ReviewDeck {
    questions: Vec<ReviewQuestion>,
}

impl ReviewDeck {
    pub fn new(questions: Vec<ReviewQuestion>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty("questions"));
        }
        ensure_unique_ids(
            "questions",
            questions.iter().map(|question| question.id.as_str()),
        )?;
        for question in &questions {
            if !question
                .options
                .iter()
                .any(|option| option.text == question.correct_answer)
            {
                return Err(CatalogError::AnswerNotAmongOptions {
                    question: question.id.clone(),
                    answer: question.correct_answer.clone(),
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn questions(&self) -> &[ReviewQuestion] {
        &self.questions
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, Eq, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FlashCard {
    pub id: String,
    pub display_text: String,
    pub transliteration: String,
    pub meaning: String,
    #[serde(default)]
    pub illustration: Option<Illustration>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FlashcardDeck {
    title: String,
    cards: Vec<FlashCard>,
}

impl FlashcardDeck {
    pub fn new(title: impl Into<String>, cards: Vec<FlashCard>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty("cards"));
        }
        ensure_unique_ids("cards", cards.iter().map(|card| card.id.as_str()))?;
        Ok(Self {
            title: title.into(),
            cards,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let deck: FlashcardDeck = serde_json::from_str(json)?;
        Self::new(deck.title, deck.cards)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }
}
