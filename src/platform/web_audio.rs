//! WebAudio tone sink
//!
//! One oscillator and gain node per tone, scheduled ahead on the
//! AudioContext clock.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::signal::{RampKind, Tone, ToneSink};

/// Tone sink backed by a browser AudioContext
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    /// Oscillators that may still sound, with their stop time
    voices: Vec<(OscillatorNode, f64)>,
}

impl WebAudioSink {
    /// Create the audio context (may fail outside a secure context)
    pub fn new() -> Option<Self> {
        let ctx = AudioContext::new().ok()?;
        Some(Self {
            ctx: Some(ctx),
            voices: Vec::new(),
        })
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Create a sine oscillator routed through its own gain node
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl ToneSink for WebAudioSink {
    fn current_time(&self) -> f64 {
        self.ctx.as_ref().map(|c| c.current_time()).unwrap_or(0.0)
    }

    fn schedule(&mut self, tone: &Tone) {
        self.resume();
        let Some(ctx) = &self.ctx else { return };

        let now = ctx.current_time();
        self.voices.retain(|(_, end)| *end > now);

        let Some((osc, gain)) = Self::create_osc(ctx, tone.shape.frequency_hz) else {
            log::warn!("Failed to create oscillator, tone skipped");
            return;
        };

        for ramp in tone.gain_ramps() {
            match ramp.kind {
                RampKind::Set => gain.gain().set_value_at_time(ramp.value, ramp.time).ok(),
                RampKind::Linear => gain
                    .gain()
                    .linear_ramp_to_value_at_time(ramp.value, ramp.time)
                    .ok(),
            };
        }

        osc.start_with_when(tone.start).ok();
        osc.stop_with_when(tone.end()).ok();
        self.voices.push((osc, tone.end()));
    }

    fn cancel(&mut self) {
        for (osc, _) in self.voices.drain(..) {
            osc.stop().ok();
        }
    }

    fn close(&mut self) {
        self.cancel();
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
    }
}
