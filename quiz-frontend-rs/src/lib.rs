#![deny(clippy::string_slice)]

pub mod audio;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod flashcards;
pub mod review;
pub mod session;
mod utils;
pub mod validator;

pub use audio::{SoundCue, SoundSink};
pub use classifier::{AutoAdvance, ClassifierSession, ClassifierState};
pub use config::{QuizConfig, Remarks};
pub use engine::{AdvancePolicy, Phase, RoundEngine, SessionState, Summary, Ticket};
pub use feedback::{CatalogFeedbackResolver, FeedbackResolver, ValidationResult};
pub use flashcards::FlashcardViewer;
pub use review::{ReviewSession, ReviewState};
pub use session::{FeedbackTicket, PendingFeedback, VerbMatchSession, VerbMatchState};
pub use utils::{random_seed, shuffled};
pub use validator::Gradable;

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::LazyLock;

use lesson_utils::decks::BucketLabel;
use lesson_utils::lesson_pack::{self, FlashcardTopic};
use lesson_utils::{
    Bucket, CatalogError, ClassificationDeck, ClassifyItem, ContentCatalog, FlashCard,
    ResponseEntry, ResponseId, ReviewDeck, ReviewQuestion, WordEntry,
};
use wasm_bindgen::prelude::*;

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
#[allow(clippy::declare_interior_mutable_const)]
const LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

fn init_logging() {
    #[allow(clippy::borrow_interior_mutable_const)]
    *LOGGER;
}

fn to_js_error(e: CatalogError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// Subscribed callbacks, keyed so that a host can drop the ones it no longer needs.
struct Listeners<L> {
    next_key: Cell<u32>,
    entries: RefCell<Vec<(u32, L)>>,
}

impl<L> Default for Listeners<L> {
    fn default() -> Self {
        Self {
            next_key: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<L: Clone> Listeners<L> {
    fn subscribe(&self, listener: L) -> u32 {
        let key = self.next_key.get();
        self.next_key.set(key.wrapping_add(1));
        self.entries.borrow_mut().push((key, listener));
        key
    }

    fn unsubscribe(&self, key: u32) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(k, _)| *k != key);
        entries.len() != before
    }

    /// Clone the listeners out so that none of them runs while the list is borrowed.
    fn snapshot(&self) -> Vec<L> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

/// Change listeners and the sound callback of one quiz.
#[derive(Default)]
struct Observers {
    listeners: Listeners<js_sys::Function>,
    sound: RefCell<Option<js_sys::Function>>,
}

impl Observers {
    fn subscribe(&self, callback: js_sys::Function) -> u32 {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, key: u32) -> bool {
        self.listeners.unsubscribe(key)
    }

    fn set_sound(&self, callback: Option<js_sys::Function>) {
        *self.sound.borrow_mut() = callback;
    }

    fn play(&self, cue: SoundCue) {
        let sound = self.sound.borrow().clone();
        sound.play(cue);
    }

    fn notify(&self) {
        // listeners usually call straight back into the quiz
        let listeners = self.listeners.snapshot();
        let this = JsValue::null();
        for listener in listeners {
            if let Err(e) = listener.call0(&this) {
                log::warn!("Listener failed: {e:?}");
            }
        }
    }
}

#[wasm_bindgen]
pub struct VerbMatchQuiz {
    // we should never hold a borrow across an .await. by avoiding this, we guarantee the absence of "borrow while locked" panics
    session: RefCell<VerbMatchSession<CatalogFeedbackResolver>>,
    observers: Observers,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl VerbMatchQuiz {
    /// Uses the bundled N5 catalog unless `catalog_json` is given.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(
        catalog_json: Option<String>,
        config: Option<QuizConfig>,
    ) -> Result<VerbMatchQuiz, JsValue> {
        init_logging();

        let catalog = match catalog_json {
            Some(json) => ContentCatalog::from_json(&json),
            None => lesson_pack::verb_master(),
        }
        .map_err(to_js_error)?;
        let catalog = Arc::new(catalog);
        let config = config.unwrap_or_default();
        let resolver = CatalogFeedbackResolver::new(Arc::clone(&catalog), config.remarks);

        Ok(Self {
            session: RefCell::new(VerbMatchSession::new(catalog, resolver)),
            observers: Observers::default(),
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_session(&self, seed: Option<u64>) -> VerbMatchState {
        let state = self
            .session
            .borrow_mut()
            .start(seed.unwrap_or_else(random_seed));
        self.observers.notify();
        state
    }

    /// Resolves to `false` if the selection was ignored.
    ///
    /// The verdict is visible (and listeners notified) before the explanation is looked up;
    /// the promise resolves once the explanation has been applied or discarded.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub async fn select_response(&self, response_id: String) -> bool {
        let pending = self
            .session
            .borrow_mut()
            .select_response(&ResponseId(response_id));
        let Some(pending) = pending else {
            return false;
        };
        self.observers.play(pending.cue);
        self.observers.notify();

        let result = pending.explanation.await;
        let applied = self
            .session
            .borrow_mut()
            .apply_feedback(&pending.ticket, result);
        if applied {
            self.observers.notify();
        }
        true
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn advance(&self) -> bool {
        let advanced = self.session.borrow_mut().advance();
        if advanced {
            self.observers.notify();
        }
        advanced
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn reset(&self) {
        self.session.borrow_mut().reset();
        self.observers.notify();
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_current_prompt(&self) -> Option<WordEntry> {
        self.session.borrow().current_prompt().cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_state(&self) -> VerbMatchState {
        self.session.borrow().state()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn list_responses(&self) -> Vec<ResponseEntry> {
        self.session.borrow().catalog().list_responses().to_vec()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn summary(&self) -> Option<Summary> {
        self.session.borrow().summary()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        self.observers.subscribe(callback)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn unsubscribe(&self, key: u32) -> bool {
        self.observers.unsubscribe(key)
    }

    /// `callback` is called with `"correct"` or `"wrong"` after every accepted selection.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_sound_callback(&self, callback: Option<js_sys::Function>) {
        self.observers.set_sound(callback);
    }
}

#[wasm_bindgen]
pub struct ClassifierQuiz {
    session: RefCell<ClassifierSession>,
    observers: Observers,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl ClassifierQuiz {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(
        deck_json: Option<String>,
        config: Option<QuizConfig>,
    ) -> Result<ClassifierQuiz, JsValue> {
        init_logging();

        let deck = match deck_json {
            Some(json) => ClassificationDeck::from_json(&json),
            None => lesson_pack::tabemasu_match(),
        }
        .map_err(to_js_error)?;

        Ok(Self {
            session: RefCell::new(ClassifierSession::new(
                Arc::new(deck),
                config.unwrap_or_default(),
            )),
            observers: Observers::default(),
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_session(&self, seed: Option<u64>) -> ClassifierState {
        let state = self
            .session
            .borrow_mut()
            .start(seed.unwrap_or_else(random_seed));
        self.observers.notify();
        state
    }

    /// Shows the verdict, then moves on to the next item once the configured delay has passed.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub async fn select(&self, bucket: Bucket) -> Result<bool, JsValue> {
        let auto = self.session.borrow_mut().select(bucket);
        let Some(auto) = auto else {
            return Ok(false);
        };
        self.observers.play(auto.cue);
        self.observers.notify();

        utils::sleep_ms(auto.delay_ms).await?;

        let advanced = self.session.borrow_mut().complete_display(auto.ticket);
        if advanced {
            self.observers.notify();
        }
        Ok(true)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn reset(&self) {
        self.session.borrow_mut().reset();
        self.observers.notify();
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_current_item(&self) -> Option<ClassifyItem> {
        self.session.borrow().current_item().cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_state(&self) -> ClassifierState {
        self.session.borrow().state()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn bucket_label(&self, bucket: Bucket) -> BucketLabel {
        self.session.borrow().deck().label(bucket).clone()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn summary(&self) -> Option<Summary> {
        self.session.borrow().summary()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        self.observers.subscribe(callback)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn unsubscribe(&self, key: u32) -> bool {
        self.observers.unsubscribe(key)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_sound_callback(&self, callback: Option<js_sys::Function>) {
        self.observers.set_sound(callback);
    }
}

#[wasm_bindgen]
pub struct ReviewQuiz {
    session: RefCell<ReviewSession>,
    observers: Observers,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl ReviewQuiz {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(
        questions_json: Option<String>,
        config: Option<QuizConfig>,
    ) -> Result<ReviewQuiz, JsValue> {
        init_logging();

        let deck = match questions_json {
            Some(json) => ReviewDeck::from_json(&json),
            None => lesson_pack::review(),
        }
        .map_err(to_js_error)?;

        Ok(Self {
            session: RefCell::new(ReviewSession::new(
                Arc::new(deck),
                config.unwrap_or_default(),
            )),
            observers: Observers::default(),
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_session(&self, seed: Option<u64>) -> ReviewState {
        let state = self
            .session
            .borrow_mut()
            .start(seed.unwrap_or_else(random_seed));
        self.observers.notify();
        state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn select_option(&self, option: String) -> bool {
        let selection = self.session.borrow_mut().select_option(option);
        let Some(selection) = selection else {
            return false;
        };
        self.observers.play(selection.cue);
        self.observers.notify();
        true
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn advance(&self) -> bool {
        let advanced = self.session.borrow_mut().advance();
        if advanced {
            self.observers.notify();
        }
        advanced
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn reset(&self) {
        self.session.borrow_mut().reset();
        self.observers.notify();
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn correct_answer(&self) -> Option<String> {
        self.session.borrow().correct_answer().map(str::to_string)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_current_question(&self) -> Option<ReviewQuestion> {
        self.session.borrow().current_question().cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn get_state(&self) -> ReviewState {
        self.session.borrow().state()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn summary(&self) -> Option<Summary> {
        self.session.borrow().summary()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        self.observers.subscribe(callback)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn unsubscribe(&self, key: u32) -> bool {
        self.observers.unsubscribe(key)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_sound_callback(&self, callback: Option<js_sys::Function>) {
        self.observers.set_sound(callback);
    }
}

#[wasm_bindgen]
pub struct FlashcardBrowser {
    viewer: FlashcardViewer,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl FlashcardBrowser {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(topic: FlashcardTopic) -> Result<FlashcardBrowser, JsValue> {
        init_logging();

        let deck = lesson_pack::flashcards(topic).map_err(to_js_error)?;
        Ok(Self {
            viewer: FlashcardViewer::new(Arc::new(deck)),
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn title(&self) -> String {
        self.viewer.title().to_string()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn current(&self) -> Option<FlashCard> {
        self.viewer.current().cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn next(&mut self) -> bool {
        self.viewer.next()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn prev(&mut self) -> bool {
        self.viewer.prev()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn position(&self) -> usize {
        self.viewer.position()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn total(&self) -> usize {
        self.viewer.total()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn is_first(&self) -> bool {
        self.viewer.is_first()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn is_last(&self) -> bool {
        self.viewer.is_last()
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
