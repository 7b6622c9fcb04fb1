use std::sync::Arc;

use futures::FutureExt as _;
use futures::future::LocalBoxFuture;
use lesson_utils::{ContentCatalog, FeedbackRecord, PromptId, ResponseId};

use crate::config::Remarks;

/// What the feedback panel shows after a selection.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_correct: bool,
    /// The verdict is final but the explanation is still on its way.
    pub is_pending: bool,
    pub remark: String,
    pub example_sentence: String,
    pub transliterated_sentence: String,
}

impl ValidationResult {
    pub fn pending(is_correct: bool) -> Self {
        Self {
            is_correct,
            is_pending: true,
            remark: String::new(),
            example_sentence: String::new(),
            transliterated_sentence: String::new(),
        }
    }

    /// A verdict with a remark and nothing else, for quizzes without example sentences.
    pub fn settled(is_correct: bool, remark: impl Into<String>) -> Self {
        Self {
            is_correct,
            is_pending: false,
            remark: remark.into(),
            example_sentence: String::new(),
            transliterated_sentence: String::new(),
        }
    }

    fn from_record(record: &FeedbackRecord) -> Self {
        Self {
            is_correct: true,
            is_pending: false,
            remark: record.remark.clone(),
            example_sentence: record.example_sentence.clone(),
            transliterated_sentence: record.transliterated_sentence.clone(),
        }
    }
}

/// Produces the explanation for a verdict that has already been decided.
///
/// The answer is a future so that the session never waits on it: the verdict is shown
/// immediately and the explanation replaces it when (and if) it arrives in time.
/// Resolvers must always produce a result; there is no error path.
pub trait FeedbackResolver {
    fn resolve(
        &self,
        prompt: &PromptId,
        response: &ResponseId,
        is_correct: bool,
    ) -> LocalBoxFuture<'static, ValidationResult>;
}

/// Looks explanations up in the catalog's feedback table.
#[derive(Clone, Debug)]
pub struct CatalogFeedbackResolver {
    catalog: Arc<ContentCatalog>,
    remarks: Remarks,
}

impl CatalogFeedbackResolver {
    pub fn new(catalog: Arc<ContentCatalog>, remarks: Remarks) -> Self {
        Self { catalog, remarks }
    }

    pub(crate) fn resolve_now(
        &self,
        prompt: &PromptId,
        response: &ResponseId,
        is_correct: bool,
    ) -> ValidationResult {
        if is_correct && let Some(record) = self.catalog.lookup_feedback(prompt, response) {
            return ValidationResult::from_record(record);
        }
        if is_correct {
            log::debug!("No feedback written for {prompt}-{response}, using the generic one");
        }

        let word = self
            .catalog
            .prompt(prompt)
            .map(|word| word.display_text.as_str())
            .unwrap_or(prompt.0.as_str());
        let verb = self
            .catalog
            .response(response)
            .map(|verb| verb.display_text.as_str())
            .unwrap_or(response.0.as_str());

        ValidationResult {
            is_correct,
            is_pending: false,
            remark: if is_correct {
                self.remarks.correct_fallback.clone()
            } else {
                self.remarks.incorrect.clone()
            },
            example_sentence: format!("{word} ... {verb}"),
            transliterated_sentence: self.remarks.missing_transliteration.clone(),
        }
    }
}

impl FeedbackResolver for CatalogFeedbackResolver {
    fn resolve(
        &self,
        prompt: &PromptId,
        response: &ResponseId,
        is_correct: bool,
    ) -> LocalBoxFuture<'static, ValidationResult> {
        futures::future::ready(self.resolve_now(prompt, response, is_correct)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn resolver() -> CatalogFeedbackResolver {
        let catalog = Arc::new(lesson_utils::lesson_pack::verb_master().unwrap());
        CatalogFeedbackResolver::new(catalog, Remarks::default())
    }

    #[test]
    fn correct_pair_with_record_is_returned_verbatim() {
        let result = block_on(resolver().resolve(&"1".into(), &"v6".into(), true));
        assert_eq!(
            result,
            ValidationResult {
                is_correct: true,
                is_pending: false,
                remark: "Harika! Kitap okunur.".to_string(),
                example_sentence: "本を読みます。".to_string(),
                transliterated_sentence: "Hon o yomimasu.".to_string(),
            }
        );
    }

    #[test]
    fn correct_pair_without_record_falls_back() {
        let result = block_on(resolver().resolve(&"1".into(), &"v99".into(), true));
        assert!(result.is_correct);
        assert!(!result.is_pending);
        assert_eq!(result.remark, "Tebrikler!");
        assert_eq!(result.example_sentence, "本 ... v99");
        assert_eq!(result.transliterated_sentence, "-");
    }

    #[test]
    fn incorrect_pair_is_generic_even_if_a_record_exists() {
        // "1-v6" has a record, but a wrong verdict never looks at the table.
        let result = block_on(resolver().resolve(&"1".into(), &"v6".into(), false));
        assert!(!result.is_correct);
        assert_eq!(result.remark, "Yanlış eşleşme.");
        assert_eq!(result.example_sentence, "本 ... 読みます");
    }

    #[test]
    fn fallback_remark_is_never_empty() {
        let resolver = resolver();
        for prompt in ["1", "2", "13", "nope"] {
            for response in ["v1", "v6", "v9", "v99"] {
                for is_correct in [true, false] {
                    let result =
                        block_on(resolver.resolve(&prompt.into(), &response.into(), is_correct));
                    assert!(!result.remark.is_empty());
                    assert_eq!(result.is_correct, is_correct);
                }
            }
        }
    }
}
