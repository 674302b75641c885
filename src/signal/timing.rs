//! Morse timing derived from words per minute
//!
//! The reference word "PARIS" spans 50 base units, so one unit lasts
//! `1200 / wpm` milliseconds. Every other duration is a multiple of it.

use std::time::Duration;

use crate::morse::{MorseSymbol, symbols};

use super::PlayerError;

/// Milliseconds per unit at 1 WPM
const PARIS_UNIT_MS: f64 = 1200.0;

/// Longest unit accepted (0.02 WPM)
const MAX_UNIT_SECS: f64 = 60.0;

/// Element durations in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorseTiming {
    wpm: f64,
    /// Base unit (one dot)
    pub unit: f64,
    pub dot: f64,
    pub dash: f64,
    /// Silence after every dot or dash
    pub symbol_gap: f64,
    /// Silence for ` ` and `/`
    pub letter_gap: f64,
}

impl MorseTiming {
    pub fn from_wpm(wpm: f64) -> Result<Self, PlayerError> {
        if !wpm.is_finite() || wpm <= 0.0 {
            return Err(PlayerError::InvalidSpeed(wpm));
        }
        let unit = PARIS_UNIT_MS / wpm / 1000.0;
        if !unit.is_finite() || unit > MAX_UNIT_SECS {
            return Err(PlayerError::InvalidSpeed(wpm));
        }
        Ok(Self {
            wpm,
            unit,
            dot: unit,
            dash: unit * 3.0,
            symbol_gap: unit,
            letter_gap: unit * 3.0,
        })
    }

    pub fn wpm(&self) -> f64 {
        self.wpm
    }

    /// Lay out a Morse string on a timeline starting at zero.
    ///
    /// The string is scanned glyph by glyph: `.` and `-` key a tone and are
    /// followed by one symbol gap, ` ` and `/` add a letter gap, anything
    /// else is ignored.
    pub fn schedule(&self, morse: &str) -> Schedule {
        let mut cursor = 0.0;
        let mut tones = Vec::new();

        for symbol in symbols(morse) {
            if symbol.is_tone() {
                let duration = if symbol == MorseSymbol::Dot {
                    self.dot
                } else {
                    self.dash
                };
                tones.push(ScheduledTone {
                    offset: cursor,
                    duration,
                });
                cursor += duration + self.symbol_gap;
            } else {
                cursor += self.letter_gap;
            }
        }

        Schedule {
            tones,
            total: cursor,
        }
    }
}

/// A tone relative to the start of playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    /// Seconds from the start of playback
    pub offset: f64,
    /// Seconds
    pub duration: f64,
}

/// Complete layout of one playback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub tones: Vec<ScheduledTone>,
    /// Seconds until playback is complete, trailing gaps included
    pub total: f64,
}

impl Schedule {
    /// Nothing to wait for
    pub fn is_empty(&self) -> bool {
        self.total <= 0.0
    }

    /// Wait time for the whole playback, saturating at `Duration::MAX`
    pub fn total_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.total.max(0.0)).unwrap_or(Duration::MAX)
    }
}
