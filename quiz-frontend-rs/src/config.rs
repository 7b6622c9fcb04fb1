/// Knobs the host can pass when it creates a quiz. Every field has a default,
/// so `{}` (or nothing at all) is a valid config.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizConfig {
    /// How long the classifier shows its verdict before moving on.
    pub auto_advance_delay_ms: u32,
    /// The review quiz is authored in teaching order, so it is not shuffled unless asked.
    pub shuffle_review: bool,
    pub remarks: Remarks,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            auto_advance_delay_ms: 1200,
            shuffle_review: false,
            remarks: Remarks::default(),
        }
    }
}

/// Generic texts shown when there is no hand-written feedback.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct Remarks {
    pub correct_fallback: String,
    pub incorrect: String,
    pub missing_transliteration: String,
    pub classified_correctly: String,
    pub classified_wrongly: String,
    pub review_correct: String,
    /// `{answer}` is replaced with the correct option.
    pub review_wrong: String,
}

impl Default for Remarks {
    fn default() -> Self {
        Self {
            correct_fallback: "Tebrikler!".to_string(),
            incorrect: "Yanlış eşleşme.".to_string(),
            missing_transliteration: "-".to_string(),
            classified_correctly: "Doğru!".to_string(),
            classified_wrongly: "Yanlış!".to_string(),
            review_correct: "Doğru!".to_string(),
            review_wrong: "Yanlış! Doğru cevap: {answer}".to_string(),
        }
    }
}

impl Remarks {
    pub(crate) fn review_wrong_for(&self, answer: &str) -> String {
        self.review_wrong.replace("{answer}", answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: QuizConfig = serde_json::from_str(r#"{ "autoAdvanceDelayMs": 0 }"#).unwrap();
        assert_eq!(config.auto_advance_delay_ms, 0);
        assert!(!config.shuffle_review);
        assert_eq!(config.remarks, Remarks::default());

        let config: QuizConfig =
            serde_json::from_str(r#"{ "remarks": { "incorrect": "Wrong pair." } }"#).unwrap();
        assert_eq!(config.remarks.incorrect, "Wrong pair.");
        assert_eq!(config.remarks.correct_fallback, "Tebrikler!");
    }

    #[test]
    fn review_wrong_mentions_the_answer() {
        assert_eq!(
            Remarks::default().review_wrong_for("本"),
            "Yanlış! Doğru cevap: 本"
        );
    }
}
