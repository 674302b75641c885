//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (timers, wall clock)
//! - Storage (LocalStorage on web)
//! - Audio output (WebAudio on web, silent elsewhere)

#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web_audio;

use crate::signal::{SilentSink, ToneSink};

/// Best audio output available, falling back to a silent timer
#[cfg(target_arch = "wasm32")]
pub fn default_sink() -> Box<dyn ToneSink> {
    match web_audio::WebAudioSink::new() {
        Some(sink) => Box::new(sink),
        None => {
            log::warn!("Failed to create AudioContext - Morse playback will be silent");
            Box::new(SilentSink::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_sink() -> Box<dyn ToneSink> {
    Box::new(SilentSink::new())
}
