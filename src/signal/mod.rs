//! Morse signal synthesis
//!
//! Timing, tone envelopes, audio sinks, and the player that ties them
//! together.

pub mod player;
pub mod sink;
pub mod timing;
pub mod tone;

pub use player::{MorsePlayer, PlayOutcome};
pub use sink::{PcmSink, SilentSink, ToneSink};
pub use timing::{MorseTiming, Schedule, ScheduledTone};
pub use tone::{GainRamp, RampKind, Tone, ToneShape};

/// Signal player failures
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("speed must be a positive number of words per minute, got {0}")]
    InvalidSpeed(f64),
    #[error("player has been disposed")]
    Disposed,
}
