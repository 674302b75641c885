//! Tone shape and anti-click envelope
//!
//! Each tone is a plain sine at a fixed carrier. Gain ramps linearly from
//! silence over the fade, holds, then ramps back to silence so the edges
//! don't click.

use crate::consts::{TONE_FADE_SECS, TONE_FREQUENCY_HZ, TONE_GAIN};

use super::timing::ScheduledTone;

/// Carrier and envelope parameters shared by every tone of a player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneShape {
    pub frequency_hz: f32,
    /// Held amplitude (fraction of full scale)
    pub gain: f32,
    /// Seconds for each of the fade-in and fade-out ramps
    pub fade: f64,
}

impl Default for ToneShape {
    fn default() -> Self {
        Self {
            frequency_hz: TONE_FREQUENCY_HZ,
            gain: TONE_GAIN,
            fade: TONE_FADE_SECS,
        }
    }
}

/// How an automation point is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    /// Jump to the value at the given time
    Set,
    /// Linear ramp from the previous point
    Linear,
}

/// One gain automation point, in sink time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainRamp {
    pub time: f64,
    pub value: f32,
    pub kind: RampKind,
}

/// A tone placed on a sink's clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Seconds on the sink clock
    pub start: f64,
    pub duration: f64,
    pub shape: ToneShape,
}

impl Tone {
    pub fn new(origin: f64, scheduled: &ScheduledTone, shape: ToneShape) -> Self {
        Self {
            start: origin + scheduled.offset,
            duration: scheduled.duration,
            shape,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Fade length, shrunk to half the tone when the tone is too short
    pub fn fade(&self) -> f64 {
        self.shape.fade.min(self.duration / 2.0).max(0.0)
    }

    /// Automation points for a gain parameter
    pub fn gain_ramps(&self) -> [GainRamp; 4] {
        let fade = self.fade();
        let gain = self.shape.gain;
        [
            GainRamp {
                time: self.start,
                value: 0.0,
                kind: RampKind::Set,
            },
            GainRamp {
                time: self.start + fade,
                value: gain,
                kind: RampKind::Linear,
            },
            GainRamp {
                time: self.end() - fade,
                value: gain,
                kind: RampKind::Set,
            },
            GainRamp {
                time: self.end(),
                value: 0.0,
                kind: RampKind::Linear,
            },
        ]
    }

    /// Envelope amplitude at sink time `t`
    pub fn amplitude_at(&self, t: f64) -> f32 {
        if t < self.start || t >= self.end() {
            return 0.0;
        }
        let fade = self.fade();
        let gain = self.shape.gain;
        if fade <= 0.0 {
            return gain;
        }
        let since_start = t - self.start;
        let until_end = self.end() - t;
        if since_start < fade {
            gain * (since_start / fade) as f32
        } else if until_end < fade {
            gain * (until_end / fade) as f32
        } else {
            gain
        }
    }

    /// Signal value at sink time `t` (sine times envelope)
    pub fn sample_at(&self, t: f64) -> f32 {
        let amp = self.amplitude_at(t);
        if amp == 0.0 {
            return 0.0;
        }
        let phase = 2.0 * std::f64::consts::PI * self.shape.frequency_hz as f64 * (t - self.start);
        amp * phase.sin() as f32
    }
}
