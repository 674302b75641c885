//! Morse Sat - satellite Morse-code quiz core
//!
//! Core modules:
//! - `morse`: Text ↔ Morse codec
//! - `signal`: Morse timing, tone synthesis, and the signal player
//! - `progress`: Per-satellite results and tier unlocking
//! - `persistence`: Key-value storage of progress
//! - `catalog`: Quiz items grouped by tier
//! - `quiz`: Answer handling for one player
//! - `settings`: Player preferences
//! - `platform`: Browser/native abstraction (timers, storage, audio)

pub mod catalog;
pub mod morse;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod quiz;
pub mod settings;
pub mod signal;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Catalog, CatalogError, Satellite};
pub use persistence::{KeyValueStore, MemoryStore, ProgressStore, StorageError};
pub use progress::{GameProgress, SatelliteProgress, TierProgress, Tiered};
pub use quiz::{AnswerOutcome, QuizSession};
pub use settings::{Settings, SpeedPreset};
pub use signal::{MorsePlayer, PlayOutcome, PlayerError};

/// Game configuration constants
pub mod consts {
    /// Default sending speed
    pub const DEFAULT_WPM: f64 = 20.0;
    /// Speed the quiz plays signals at
    pub const QUIZ_WPM: f64 = 15.0;
    /// Slowest/fastest speed accepted from settings
    pub const MIN_WPM: f64 = 5.0;
    pub const MAX_WPM: f64 = 50.0;

    /// Sidetone carrier
    pub const TONE_FREQUENCY_HZ: f32 = 800.0;
    /// Held amplitude, fraction of full scale
    pub const TONE_GAIN: f32 = 0.3;
    /// Fade-in and fade-out length (anti-click)
    pub const TONE_FADE_SECS: f64 = 0.005;

    /// LocalStorage keys
    pub const PROGRESS_STORAGE_KEY: &str = "morse-sat-progress";
    pub const SETTINGS_STORAGE_KEY: &str = "morse-sat-settings";
}
