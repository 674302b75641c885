//! Quiz session
//!
//! Glue between the catalog, progress, and storage for one player: each
//! answer is applied to the progress and written back before the next
//! event is handled.

use crate::catalog::{Catalog, Satellite};
use crate::persistence::{KeyValueStore, ProgressStore};
use crate::platform::time::now_ms;
use crate::progress::{GameProgress, TierProgress};

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Right answer; `unlocked` is set when this answer opened a new tier
    Correct {
        level: u32,
        unlocked: Option<u32>,
        all_complete: bool,
    },
    /// Wrong answer, with the satellite's attempt count after it
    Incorrect { attempts: u32 },
    /// No such satellite; nothing changed
    UnknownItem,
    /// Satellite's tier is still locked; nothing changed
    Locked,
}

/// One player's quiz state
pub struct QuizSession<S: KeyValueStore> {
    catalog: Catalog,
    store: ProgressStore<S>,
    progress: GameProgress,
}

impl<S: KeyValueStore> QuizSession<S> {
    /// Start a session from whatever progress the store holds
    pub fn new(catalog: Catalog, store: S) -> Self {
        let store = ProgressStore::new(store);
        let progress = store.load();
        Self {
            catalog,
            store,
            progress,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    /// Satellites the player may open right now
    pub fn playable(&self) -> impl Iterator<Item = &Satellite> {
        self.catalog
            .satellites()
            .iter()
            .filter(|s| self.progress.is_unlocked(s.tier))
    }

    pub fn is_playable(&self, id: &str) -> bool {
        self.catalog
            .get(id)
            .is_some_and(|s| self.progress.is_unlocked(s.tier))
    }

    pub fn tier_summary(&self) -> Vec<TierProgress> {
        self.progress.tier_summary(self.catalog.satellites())
    }

    pub fn is_all_complete(&self) -> bool {
        self.progress.is_all_complete(self.catalog.satellites())
    }

    /// Apply an answer at the current wall-clock time
    pub fn submit_answer(&mut self, id: &str, choice: &str) -> AnswerOutcome {
        self.submit_answer_at(id, choice, now_ms())
    }

    /// Apply an answer with an explicit timestamp (Unix ms)
    pub fn submit_answer_at(&mut self, id: &str, choice: &str, timestamp: f64) -> AnswerOutcome {
        let Some(sat) = self.catalog.get(id) else {
            log::warn!("Answer for unknown satellite {:?} ignored", id);
            return AnswerOutcome::UnknownItem;
        };
        if !self.progress.is_unlocked(sat.tier) {
            log::warn!("Answer for locked satellite {:?} ignored", id);
            return AnswerOutcome::Locked;
        }

        let progress = std::mem::take(&mut self.progress);
        let outcome = if sat.is_correct(choice) {
            let before = progress.level;
            let next = progress
                .mark_complete(id, timestamp)
                .update_level(self.catalog.satellites());
            let outcome = AnswerOutcome::Correct {
                level: next.level,
                unlocked: (next.level > before).then_some(next.level),
                all_complete: next.is_all_complete(self.catalog.satellites()),
            };
            self.progress = next;
            outcome
        } else {
            let next = progress.increment_attempts(id, timestamp);
            let attempts = next.attempts(id);
            self.progress = next;
            AnswerOutcome::Incorrect { attempts }
        };

        self.store.save(&self.progress);
        outcome
    }

    /// Wipe progress and persist the fresh state
    pub fn reset(&mut self) -> &GameProgress {
        self.progress = self.store.reset();
        &self.progress
    }
}
