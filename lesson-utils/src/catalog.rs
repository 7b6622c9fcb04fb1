use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{FeedbackKey, FeedbackRecord, PromptId, ResponseEntry, ResponseId, WordEntry};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog has no {0}")]
    Empty(&'static str),

    #[error("Duplicate id {id:?} among {kind}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Word {prompt} accepts verb {response}, which is not in the verb list")]
    UnknownResponse {
        prompt: PromptId,
        response: ResponseId,
    },

    #[error("Word {0} has no acceptable verbs")]
    NoAcceptableResponses(PromptId),

    #[error("Feedback key {0:?} is not of the form <word>-<verb>")]
    MalformedFeedbackKey(String),

    #[error("Feedback entry {0} refers to a word or verb that is not in the catalog")]
    OrphanFeedback(FeedbackKey),

    #[error("Question {question} has correct answer {answer:?}, which is not one of its options")]
    AnswerNotAmongOptions { question: String, answer: String },

    #[error("Could not parse fixture")]
    Json(#[from] serde_json::Error),
}

/// Serialized form of a verb-matching catalog, as shipped in the lesson pack.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct CatalogFixture {
    pub prompts: Vec<WordEntry>,
    pub responses: Vec<ResponseEntry>,
    /// Keyed by `"<word>-<verb>"`.
    #[serde(default)]
    pub feedback: BTreeMap<String, FeedbackRecord>,
}

impl CatalogFixture {
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(CatalogFixture)
    }
}

/// The words, verbs and feedback table of one lesson.
///
/// Built once and then only read; sessions share it behind an `Arc`.
/// Construction rejects any catalog where a word accepts a verb that does not exist,
/// so the validator never has to deal with dangling ids mid-session.
#[derive(Debug)]
pub struct ContentCatalog {
    prompts: Vec<WordEntry>,
    responses: Vec<ResponseEntry>,
    prompt_index: FxHashMap<PromptId, usize>,
    response_index: FxHashMap<ResponseId, usize>,
    feedback: FxHashMap<FeedbackKey, FeedbackRecord>,
}

impl ContentCatalog {
    pub fn new(
        prompts: Vec<WordEntry>,
        responses: Vec<ResponseEntry>,
        feedback: impl IntoIterator<Item = (FeedbackKey, FeedbackRecord)>,
    ) -> Result<Self, CatalogError> {
        if prompts.is_empty() {
            return Err(CatalogError::Empty("words"));
        }
        if responses.is_empty() {
            return Err(CatalogError::Empty("verbs"));
        }

        let mut response_index = FxHashMap::default();
        for (index, response) in responses.iter().enumerate() {
            if response_index.insert(response.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "verbs",
                    id: response.id.to_string(),
                });
            }
        }

        let mut prompt_index = FxHashMap::default();
        for (index, prompt) in prompts.iter().enumerate() {
            if prompt_index.insert(prompt.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "words",
                    id: prompt.id.to_string(),
                });
            }
            if prompt.acceptable_response_ids.is_empty() {
                return Err(CatalogError::NoAcceptableResponses(prompt.id.clone()));
            }
            if let Some(missing) = prompt
                .acceptable_response_ids
                .iter()
                .find(|response| !response_index.contains_key(*response))
            {
                return Err(CatalogError::UnknownResponse {
                    prompt: prompt.id.clone(),
                    response: missing.clone(),
                });
            }
        }

        let mut table = FxHashMap::default();
        for (key, record) in feedback {
            if !prompt_index.contains_key(&key.prompt) || !response_index.contains_key(&key.response)
            {
                return Err(CatalogError::OrphanFeedback(key));
            }
            table.insert(key, record);
        }

        let catalog = Self {
            prompts,
            responses,
            prompt_index,
            response_index,
            feedback: table,
        };
        log::debug!(
            "Loaded catalog with {} words, {} verbs and {} feedback entries",
            catalog.prompts.len(),
            catalog.responses.len(),
            catalog.feedback.len()
        );
        Ok(catalog)
    }

    pub fn from_fixture(fixture: CatalogFixture) -> Result<Self, CatalogError> {
        let feedback = fixture
            .feedback
            .into_iter()
            .map(|(key, record)| {
                key.parse::<FeedbackKey>()
                    .map(|key| (key, record))
                    .map_err(|_| CatalogError::MalformedFeedbackKey(key))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fixture.prompts, fixture.responses, feedback)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Self::from_fixture(fixture).inspect_err(|e| {
            log::error!("Rejected catalog: {e}");
        })
    }

    pub fn list_prompts(&self) -> &[WordEntry] {
        &self.prompts
    }

    pub fn list_responses(&self) -> &[ResponseEntry] {
        &self.responses
    }

    pub fn prompt(&self, id: &PromptId) -> Option<&WordEntry> {
        self.prompt_index.get(id).map(|&index| &self.prompts[index])
    }

    pub fn response(&self, id: &ResponseId) -> Option<&ResponseEntry> {
        self.response_index
            .get(id)
            .map(|&index| &self.responses[index])
    }

    /// The hand-written explanation for this pair, if anyone wrote one.
    pub fn lookup_feedback(
        &self,
        prompt: &PromptId,
        response: &ResponseId,
    ) -> Option<&FeedbackRecord> {
        self.feedback.get(&FeedbackKey::new(prompt, response))
    }

    pub fn feedback_len(&self) -> usize {
        self.feedback.len()
    }
}

/// Fails with `DuplicateId` if two entries share an id.
pub(crate) fn ensure_unique_ids<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
