//! Morse signal player
//!
//! Turns a Morse string into scheduled tones and resolves once the whole
//! signal has had time to play. A new `play` interrupts the previous one:
//! its pending tones are silenced and its future settles right away.

use std::cell::{Cell, RefCell};

use futures::channel::oneshot;
use futures::future::{self, Either};

use crate::platform;
use crate::settings::Settings;

use super::PlayerError;
use super::sink::ToneSink;
use super::timing::{MorseTiming, Schedule};
use super::tone::{Tone, ToneShape};

/// How a call to [`MorsePlayer::play`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The full signal duration elapsed
    Finished,
    /// A newer `play` or `dispose` cut this one short
    Interrupted,
}

/// Handle to the playback currently in flight
struct Pending {
    id: u64,
    cancel: oneshot::Sender<()>,
}

/// Plays Morse strings through an owned [`ToneSink`]
pub struct MorsePlayer {
    timing: MorseTiming,
    shape: ToneShape,
    sink: RefCell<Option<Box<dyn ToneSink>>>,
    pending: RefCell<Option<Pending>>,
    next_id: Cell<u64>,
}

impl MorsePlayer {
    /// Player on the platform's audio output, silent if there is none
    pub fn new(wpm: f64) -> Result<Self, PlayerError> {
        Self::with_sink(wpm, ToneShape::default(), platform::default_sink())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, PlayerError> {
        Self::with_sink(
            settings.wpm,
            settings.tone_shape(),
            platform::default_sink(),
        )
    }

    pub fn with_sink(
        wpm: f64,
        shape: ToneShape,
        sink: Box<dyn ToneSink>,
    ) -> Result<Self, PlayerError> {
        let timing = MorseTiming::from_wpm(wpm)?;
        log::debug!(
            "Morse player at {} WPM (unit {:.1} ms, audible: {})",
            wpm,
            timing.unit * 1000.0,
            sink.is_audible()
        );
        Ok(Self {
            timing,
            shape,
            sink: RefCell::new(Some(sink)),
            pending: RefCell::new(None),
            next_id: Cell::new(0),
        })
    }

    pub fn timing(&self) -> &MorseTiming {
        &self.timing
    }

    pub fn is_disposed(&self) -> bool {
        self.sink.borrow().is_none()
    }

    /// Layout `play` would use for this string
    pub fn schedule(&self, morse: &str) -> Schedule {
        self.timing.schedule(morse)
    }

    /// Play a Morse string and wait until it has finished.
    ///
    /// Empty or unrecognised input settles immediately with no tones. Fails
    /// only when the player has been disposed.
    ///
    /// Native builds wait on tokio timers, so the future must be polled
    /// inside a tokio runtime with time enabled.
    pub async fn play(&self, morse: &str) -> Result<PlayOutcome, PlayerError> {
        let schedule = self.timing.schedule(morse);

        let (id, cancelled) = {
            let mut sink = self.sink.borrow_mut();
            let Some(sink) = sink.as_mut() else {
                return Err(PlayerError::Disposed);
            };

            self.interrupt_pending();
            sink.cancel();

            if schedule.is_empty() {
                return Ok(PlayOutcome::Finished);
            }

            let origin = sink.current_time();
            for scheduled in &schedule.tones {
                sink.schedule(&Tone::new(origin, scheduled, self.shape));
            }

            let id = self.next_id.get();
            self.next_id.set(id.wrapping_add(1));
            let (cancel, cancelled) = oneshot::channel();
            *self.pending.borrow_mut() = Some(Pending { id, cancel });
            (id, cancelled)
        };

        log::trace!(
            "Playing {} tones over {:.3}s",
            schedule.tones.len(),
            schedule.total
        );

        let timer = Box::pin(platform::time::sleep(schedule.total_duration()));
        match future::select(timer, cancelled).await {
            Either::Left(_) => {
                let mut pending = self.pending.borrow_mut();
                if pending.as_ref().is_some_and(|p| p.id == id) {
                    pending.take();
                }
                Ok(PlayOutcome::Finished)
            }
            Either::Right(_) => Ok(PlayOutcome::Interrupted),
        }
    }

    /// Stop any playback and release the audio output
    pub fn dispose(&self) {
        self.interrupt_pending();
        if let Some(mut sink) = self.sink.borrow_mut().take() {
            sink.cancel();
            sink.close();
            log::debug!("Morse player disposed");
        }
    }

    fn interrupt_pending(&self) {
        if let Some(pending) = self.pending.borrow_mut().take() {
            // Receiver may already be gone if that play future was dropped
            let _ = pending.cancel.send(());
        }
    }
}

impl Drop for MorsePlayer {
    fn drop(&mut self) {
        self.dispose();
    }
}
