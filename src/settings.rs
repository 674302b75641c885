//! Player settings and preferences
//!
//! Persisted separately from progress in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_WPM, MIN_WPM, QUIZ_WPM, SETTINGS_STORAGE_KEY, TONE_FADE_SECS, TONE_FREQUENCY_HZ, TONE_GAIN,
};
use crate::persistence::KeyValueStore;
use crate::signal::ToneShape;

/// Named sending speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedPreset {
    Beginner,
    #[default]
    Standard,
    Fast,
    Contest,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Beginner => "Beginner",
            SpeedPreset::Standard => "Standard",
            SpeedPreset::Fast => "Fast",
            SpeedPreset::Contest => "Contest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" | "slow" => Some(SpeedPreset::Beginner),
            "standard" | "std" => Some(SpeedPreset::Standard),
            "fast" => Some(SpeedPreset::Fast),
            "contest" => Some(SpeedPreset::Contest),
            _ => None,
        }
    }

    /// Words per minute for this preset
    pub fn wpm(&self) -> f64 {
        match self {
            SpeedPreset::Beginner => 10.0,
            SpeedPreset::Standard => QUIZ_WPM,
            SpeedPreset::Fast => 20.0,
            SpeedPreset::Contest => 30.0,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sending speed in words per minute
    pub wpm: f64,
    /// Carrier frequency
    pub tone_frequency_hz: f32,
    /// Tone amplitude (0.0 - 1.0)
    pub volume: f32,
    /// Keep timing, drop the sound
    pub muted: bool,
    /// Play the signal as soon as a satellite is opened
    pub autoplay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wpm: QUIZ_WPM,
            tone_frequency_hz: TONE_FREQUENCY_HZ,
            volume: TONE_GAIN,
            muted: false,
            autoplay: true,
        }
    }
}

impl Settings {
    pub fn from_preset(preset: SpeedPreset) -> Self {
        Self {
            wpm: preset.wpm(),
            ..Self::default()
        }
    }

    /// Set speed, clamped to the supported range
    pub fn set_wpm(&mut self, wpm: f64) {
        if wpm.is_finite() {
            self.wpm = wpm.clamp(MIN_WPM, MAX_WPM);
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Tone parameters for the player (muted keeps gain at zero)
    pub fn tone_shape(&self) -> ToneShape {
        ToneShape {
            frequency_hz: self.tone_frequency_hz,
            gain: if self.muted {
                0.0
            } else {
                self.volume.clamp(0.0, 1.0)
            },
            fade: TONE_FADE_SECS,
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(SETTINGS_STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    // Stored speed may predate the current limits
                    let wpm = settings.wpm;
                    settings.wpm = QUIZ_WPM;
                    settings.set_wpm(wpm);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(SETTINGS_STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            },
            Err(e) => log::warn!("Settings not serialized: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_match_quiz_tone() {
        let settings = Settings::default();
        assert_eq!(settings.wpm, 15.0);
        let shape = settings.tone_shape();
        assert_eq!(shape, ToneShape::default());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(SpeedPreset::from_str("FAST"), Some(SpeedPreset::Fast));
        assert_eq!(SpeedPreset::from_str("slow"), Some(SpeedPreset::Beginner));
        assert_eq!(SpeedPreset::from_str("warp"), None);
        assert_eq!(Settings::from_preset(SpeedPreset::Contest).wpm, 30.0);
        assert_eq!(SpeedPreset::default().as_str(), "Standard");
    }

    #[test]
    fn test_clamping() {
        let mut settings = Settings::default();
        settings.set_wpm(1000.0);
        assert_eq!(settings.wpm, MAX_WPM);
        settings.set_wpm(f64::NAN);
        assert_eq!(settings.wpm, MAX_WPM);
        settings.set_volume(3.0);
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn test_muted_shape_is_silent() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.tone_shape().gain, 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.set_wpm(22.0);
        settings.autoplay = false;
        settings.save(&store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_load_partial_and_broken() {
        let store = MemoryStore::new().with_entry(SETTINGS_STORAGE_KEY, r#"{"wpm": 0}"#);
        let loaded = Settings::load(&store);
        assert_eq!(loaded.wpm, MIN_WPM);
        assert!(loaded.autoplay);

        let store = MemoryStore::new().with_entry(SETTINGS_STORAGE_KEY, "nope");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
