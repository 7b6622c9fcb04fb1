use lesson_utils::{Bucket, ClassifyItem, ResponseEntry, ReviewQuestion, WordEntry};

/// A prompt that can tell whether a response answers it.
///
/// This is the only thing the round engine needs to know about a quiz variant's content.
pub trait Gradable<R> {
    fn is_answered_by(&self, response: &R) -> bool;
}

/// A verb fits a word when the word lists it as acceptable.
pub fn validate(prompt: &WordEntry, response: &ResponseEntry) -> bool {
    prompt.acceptable_response_ids.contains(&response.id)
}

pub fn validate_classification(item: &ClassifyItem, chosen: Bucket) -> bool {
    chosen == item.bucket
}

pub fn validate_review(question: &ReviewQuestion, chosen_option: &str) -> bool {
    chosen_option == question.correct_answer
}

impl Gradable<ResponseEntry> for WordEntry {
    fn is_answered_by(&self, response: &ResponseEntry) -> bool {
        validate(self, response)
    }
}

impl Gradable<Bucket> for ClassifyItem {
    fn is_answered_by(&self, response: &Bucket) -> bool {
        validate_classification(self, *response)
    }
}

impl Gradable<String> for ReviewQuestion {
    fn is_answered_by(&self, response: &String) -> bool {
        validate_review(self, response)
    }
}
