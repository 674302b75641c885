//! Audio output seam
//!
//! A `ToneSink` owns one output resource and a clock. The player asks it
//! for the current time, then schedules every tone of a playback ahead of
//! time. The sink never decides when playback is over; the player does.

use crate::platform::time::Stopwatch;

use super::tone::Tone;

/// Audio output that can schedule tones against its own clock
pub trait ToneSink {
    /// Seconds on the sink clock
    fn current_time(&self) -> f64;

    /// Queue a tone; `tone.start` is in sink time
    fn schedule(&mut self, tone: &Tone);

    /// Silence every tone that has not finished yet
    fn cancel(&mut self);

    /// Release the output resource. Later calls are ignored.
    fn close(&mut self);

    /// Whether tones actually reach a speaker
    fn is_audible(&self) -> bool {
        true
    }
}

/// Sink used when no audio device exists. Keeps time, makes no sound.
#[derive(Debug)]
pub struct SilentSink {
    clock: Stopwatch,
}

impl SilentSink {
    pub fn new() -> Self {
        Self {
            clock: Stopwatch::start(),
        }
    }
}

impl Default for SilentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSink for SilentSink {
    fn current_time(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    fn schedule(&mut self, _tone: &Tone) {}

    fn cancel(&mut self) {}

    fn close(&mut self) {}

    fn is_audible(&self) -> bool {
        false
    }
}

/// Collects tones and renders them to mono PCM on demand
#[derive(Debug)]
pub struct PcmSink {
    clock: Stopwatch,
    tones: Vec<Tone>,
    closed: bool,
}

impl PcmSink {
    pub fn new() -> Self {
        Self {
            clock: Stopwatch::start(),
            tones: Vec::new(),
            closed: false,
        }
    }

    /// Tones accepted so far, after any cancellation
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Render every tone, starting at sink time zero
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let rate = sample_rate as f64;
        let end = self.tones.iter().map(Tone::end).fold(0.0, f64::max);
        let mut samples = vec![0.0f32; (end * rate).ceil() as usize];

        for tone in &self.tones {
            let first = (tone.start * rate).floor() as usize;
            let last = ((tone.end() * rate).ceil() as usize).min(samples.len());
            for (i, sample) in samples.iter_mut().enumerate().take(last).skip(first) {
                *sample += tone.sample_at(i as f64 / rate);
            }
        }
        samples
    }
}

impl Default for PcmSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSink for PcmSink {
    fn current_time(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    fn schedule(&mut self, tone: &Tone) {
        if !self.closed {
            self.tones.push(*tone);
        }
    }

    fn cancel(&mut self) {
        let now = self.current_time();
        self.tones.retain(|t| t.start < now);
        // Cut the tone that is sounding right now
        for tone in &mut self.tones {
            if tone.end() > now {
                tone.duration = now - tone.start;
            }
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::tone::ToneShape;

    fn tone(start: f64, duration: f64) -> Tone {
        Tone {
            start,
            duration,
            shape: ToneShape::default(),
        }
    }

    #[test]
    fn test_silent_sink_is_not_audible() {
        let mut sink = SilentSink::new();
        sink.schedule(&tone(0.0, 0.1));
        assert!(!sink.is_audible());
        assert!(sink.current_time() >= 0.0);
    }

    #[test]
    fn test_pcm_render_length_and_peak() {
        let mut sink = PcmSink::new();
        sink.schedule(&tone(0.0, 0.060));
        sink.schedule(&tone(0.120, 0.060));
        let pcm = sink.render(8000);
        assert!((1440..=1441).contains(&pcm.len()));

        let peak = pcm.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= 0.3 + 1e-6);
        assert!(peak > 0.25);
        // Gap between the two tones is silent
        assert!(pcm[500..900].iter().all(|s| *s == 0.0));
        // Edges start from silence
        assert!(pcm[0].abs() < 1e-6);
    }

    #[test]
    fn test_pcm_closed_ignores_tones() {
        let mut sink = PcmSink::new();
        sink.close();
        sink.schedule(&tone(0.0, 0.1));
        assert!(sink.is_closed());
        assert!(sink.tones().is_empty());
        assert!(sink.render(8000).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pcm_cancel_drops_future_tones() {
        let mut sink = PcmSink::new();
        sink.schedule(&tone(0.0, 0.1));
        sink.schedule(&tone(0.2, 0.1));
        tokio::time::advance(std::time::Duration::from_millis(50)).await;
        sink.cancel();
        assert_eq!(sink.tones().len(), 1);
        assert!((sink.tones()[0].duration - 0.05).abs() < 1e-6);
    }
}
