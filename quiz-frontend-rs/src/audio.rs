/// Which jingle the host should play after a selection. Playing it is the host's business;
/// the quiz never waits for it.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum SoundCue {
    Correct,
    Wrong,
}

impl SoundCue {
    pub fn for_verdict(is_correct: bool) -> Self {
        if is_correct {
            SoundCue::Correct
        } else {
            SoundCue::Wrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Correct => "correct",
            SoundCue::Wrong => "wrong",
        }
    }
}

/// Something that can play a cue. Failures are swallowed: a missing sound never blocks a quiz.
pub trait SoundSink {
    fn play(&self, cue: SoundCue);
}

/// Forwards cues to a JS callback as `"correct"` / `"wrong"`.
impl SoundSink for js_sys::Function {
    fn play(&self, cue: SoundCue) {
        let this = wasm_bindgen::JsValue::null();
        if let Err(e) = self.call1(&this, &wasm_bindgen::JsValue::from_str(cue.as_str())) {
            log::warn!("Sound callback failed: {e:?}");
        }
    }
}

impl<S: SoundSink> SoundSink for Option<S> {
    fn play(&self, cue: SoundCue) {
        if let Some(sink) = self {
            sink.play(cue);
        }
    }
}
