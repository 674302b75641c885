//! Browser bindings
//!
//! The globe and quiz UI live in JavaScript; they reach the core only
//! through these handles.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::consts::DEFAULT_WPM;
use crate::morse;
use crate::platform::storage::LocalStorage;
use crate::quiz::{AnswerOutcome, QuizSession};
use crate::signal::MorsePlayer;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger was installed by an earlier start
        return;
    }
    log::info!("Morse Sat core ready");
}

#[wasm_bindgen(js_name = encodeMorse)]
pub fn encode_morse(text: &str) -> String {
    morse::encode(text)
}

#[wasm_bindgen(js_name = decodeMorse)]
pub fn decode_morse(code: &str) -> String {
    morse::decode(code)
}

/// Signal player exposed to JS: `new`, `play`, `dispose`
#[wasm_bindgen]
pub struct MorsePlayerHandle {
    player: Rc<MorsePlayer>,
}

#[wasm_bindgen]
impl MorsePlayerHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(wpm: Option<f64>) -> Result<MorsePlayerHandle, JsError> {
        let player = MorsePlayer::new(wpm.unwrap_or(DEFAULT_WPM))?;
        Ok(Self {
            player: Rc::new(player),
        })
    }

    /// Resolves once the signal has finished or been interrupted
    pub fn play(&self, morse: String) -> js_sys::Promise {
        let player = Rc::clone(&self.player);
        wasm_bindgen_futures::future_to_promise(async move {
            match player.play(&morse).await {
                Ok(_) => Ok(JsValue::UNDEFINED),
                Err(e) => Err(JsError::new(&e.to_string()).into()),
            }
        })
    }

    pub fn dispose(&self) {
        self.player.dispose();
    }
}

/// Quiz state backed by LocalStorage and the bundled catalog
#[wasm_bindgen]
pub struct QuizHandle {
    session: QuizSession<LocalStorage>,
}

#[wasm_bindgen]
impl QuizHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<QuizHandle, JsError> {
        let catalog = Catalog::builtin()?;
        Ok(Self {
            session: QuizSession::new(catalog, LocalStorage),
        })
    }

    #[wasm_bindgen(js_name = catalogJson)]
    pub fn catalog_json(&self) -> Result<String, JsError> {
        Ok(self.session.catalog().to_json()?)
    }

    #[wasm_bindgen(js_name = progressJson)]
    pub fn progress_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.progress())?)
    }

    pub fn level(&self) -> u32 {
        self.session.progress().level
    }

    #[wasm_bindgen(js_name = isPlayable)]
    pub fn is_playable(&self, id: &str) -> bool {
        self.session.is_playable(id)
    }

    /// Apply an answer; returns the outcome as JSON
    #[wasm_bindgen(js_name = submitAnswer)]
    pub fn submit_answer(&mut self, id: &str, choice: &str) -> String {
        let outcome = match self.session.submit_answer(id, choice) {
            AnswerOutcome::Correct {
                level,
                unlocked,
                all_complete,
            } => serde_json::json!({
                "result": "correct",
                "level": level,
                "unlocked": unlocked,
                "allComplete": all_complete,
            }),
            AnswerOutcome::Incorrect { attempts } => serde_json::json!({
                "result": "incorrect",
                "attempts": attempts,
            }),
            AnswerOutcome::UnknownItem => serde_json::json!({ "result": "unknown" }),
            AnswerOutcome::Locked => serde_json::json!({ "result": "locked" }),
        };
        outcome.to_string()
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
