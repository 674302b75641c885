//! Quiz progression
//!
//! Per-satellite completion and attempts, plus the unlocked tier. Every
//! operation takes the progress by value and hands back the next state;
//! persistence lives in [`crate::persistence`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything placed in a difficulty tier
pub trait Tiered {
    fn id(&self) -> &str;
    /// 1 = easiest
    fn tier(&self) -> u32;
}

impl Tiered for (&str, u32) {
    fn id(&self) -> &str {
        self.0
    }

    fn tier(&self) -> u32 {
        self.1
    }
}

/// Record for one satellite, created on first interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteProgress {
    pub id: String,
    /// Never reverts once set
    pub completed: bool,
    /// Wrong answers so far
    pub attempts: u32,
    /// Unix timestamp (ms) of the last answer
    pub last_attempt: f64,
}

impl SatelliteProgress {
    fn new(id: &str, timestamp: f64) -> Self {
        Self {
            id: id.to_string(),
            completed: false,
            attempts: 0,
            last_attempt: timestamp,
        }
    }
}

/// Completion counts for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProgress {
    pub tier: u32,
    pub completed: usize,
    pub total: usize,
    pub unlocked: bool,
}

impl TierProgress {
    pub fn is_cleared(&self) -> bool {
        self.completed == self.total
    }
}

/// Whole-game progress, serialized as one JSON blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProgress {
    pub satellites: BTreeMap<String, SatelliteProgress>,
    /// Highest unlocked tier
    pub level: u32,
    /// Always the number of completed entries in `satellites`
    pub total_completed: u32,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgress {
    /// Fresh start: level 1, nothing attempted
    pub fn new() -> Self {
        Self {
            satellites: BTreeMap::new(),
            level: 1,
            total_completed: 0,
        }
    }

    fn entry(&mut self, id: &str, timestamp: f64) -> &mut SatelliteProgress {
        self.satellites
            .entry(id.to_string())
            .or_insert_with(|| SatelliteProgress::new(id, timestamp))
    }

    /// Mark a satellite cleared. Repeating it only refreshes the timestamp.
    pub fn mark_complete(mut self, id: &str, timestamp: f64) -> Self {
        let sat = self.entry(id, timestamp);
        sat.completed = true;
        sat.last_attempt = timestamp;
        self.total_completed = self.recount();
        self
    }

    /// Record a wrong answer
    pub fn increment_attempts(mut self, id: &str, timestamp: f64) -> Self {
        let sat = self.entry(id, timestamp);
        sat.attempts = sat.attempts.saturating_add(1);
        sat.last_attempt = timestamp;
        self
    }

    /// Unlock the next tier if the current one is fully cleared.
    ///
    /// Advances at most one tier per call and never past the highest tier
    /// present in `items`. Call again after each answer to cascade.
    pub fn update_level<T: Tiered>(mut self, items: &[T]) -> Self {
        let top_tier = items.iter().map(Tiered::tier).max().unwrap_or(1);
        let current = self.level;
        if current >= top_tier {
            return self;
        }

        let cleared = items
            .iter()
            .filter(|item| item.tier() == current)
            .all(|item| self.is_completed(item.id()));
        if cleared {
            self.level = current + 1;
            log::info!("Tier {} cleared, level {} unlocked", current, self.level);
        }
        self
    }

    /// Repair a loaded blob: recount completions, level at least 1
    pub fn normalized(mut self) -> Self {
        self.total_completed = self.recount();
        self.level = self.level.max(1);
        for (id, sat) in self.satellites.iter_mut() {
            if sat.id != *id {
                sat.id = id.clone();
            }
        }
        self
    }

    /// Number of completed entries
    pub fn recount(&self) -> u32 {
        self.satellites.values().filter(|s| s.completed).count() as u32
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.satellites.get(id).is_some_and(|s| s.completed)
    }

    pub fn attempts(&self, id: &str) -> u32 {
        self.satellites.get(id).map(|s| s.attempts).unwrap_or(0)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.satellites
            .values()
            .filter(|s| s.completed)
            .map(|s| s.id.as_str())
    }

    pub fn is_unlocked(&self, tier: u32) -> bool {
        tier <= self.level
    }

    /// Per-tier counts, ascending by tier
    pub fn tier_summary<T: Tiered>(&self, items: &[T]) -> Vec<TierProgress> {
        let mut tiers: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
        for item in items {
            let counts = tiers.entry(item.tier()).or_default();
            counts.1 += 1;
            if self.is_completed(item.id()) {
                counts.0 += 1;
            }
        }
        tiers
            .into_iter()
            .map(|(tier, (completed, total))| TierProgress {
                tier,
                completed,
                total,
                unlocked: self.is_unlocked(tier),
            })
            .collect()
    }

    /// Every item cleared
    pub fn is_all_complete<T: Tiered>(&self, items: &[T]) -> bool {
        !items.is_empty() && items.iter().all(|item| self.is_completed(item.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: [(&str, u32); 6] = [
        ("a1", 1),
        ("a2", 1),
        ("a3", 1),
        ("b1", 2),
        ("b2", 2),
        ("c1", 3),
    ];

    #[test]
    fn test_new_is_empty() {
        let p = GameProgress::new();
        assert!(p.satellites.is_empty());
        assert_eq!(p.level, 1);
        assert_eq!(p.total_completed, 0);
    }

    #[test]
    fn test_mark_complete_idempotent() {
        let once = GameProgress::new().mark_complete("a1", 100.0);
        let twice = once.clone().mark_complete("a1", 200.0);

        assert!(twice.is_completed("a1"));
        assert_eq!(once.total_completed, 1);
        assert_eq!(twice.total_completed, 1);
        assert_eq!(twice.satellites["a1"].last_attempt, 200.0);
    }

    #[test]
    fn test_increment_attempts_leaves_completion() {
        let p = GameProgress::new()
            .increment_attempts("a1", 1.0)
            .increment_attempts("a1", 2.0);
        assert_eq!(p.attempts("a1"), 2);
        assert!(!p.is_completed("a1"));
        assert_eq!(p.total_completed, 0);

        // Attempts on a cleared item keep it cleared
        let p = p.mark_complete("a1", 3.0).increment_attempts("a1", 4.0);
        assert!(p.is_completed("a1"));
        assert_eq!(p.total_completed, 1);
        assert_eq!(p.attempts("a1"), 3);
    }

    #[test]
    fn test_total_matches_recount_after_any_sequence() {
        let mut p = GameProgress::new();
        let steps = ["a1", "b1", "a1", "c1", "a2", "b1"];
        for (i, id) in steps.iter().enumerate() {
            p = if i % 2 == 0 {
                p.mark_complete(id, i as f64)
            } else {
                p.increment_attempts(id, i as f64)
            };
            p = p.update_level(&CATALOG);
            assert_eq!(p.total_completed, p.recount());
        }
        assert_eq!(p.total_completed, 2);
    }

    #[test]
    fn test_level_unlocks_after_tier_cleared() {
        let mut p = GameProgress::new();
        for id in ["a1", "a2"] {
            p = p.mark_complete(id, 0.0).update_level(&CATALOG);
            assert_eq!(p.level, 1);
        }
        p = p.mark_complete("a3", 0.0).update_level(&CATALOG);
        assert_eq!(p.level, 2);

        // One tier-2 item is not enough
        p = p.mark_complete("b1", 0.0).update_level(&CATALOG);
        assert_eq!(p.level, 2);

        p = p.mark_complete("b2", 0.0).update_level(&CATALOG);
        assert_eq!(p.level, 3);

        // Top tier: nothing further to unlock
        p = p.mark_complete("c1", 0.0).update_level(&CATALOG);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn test_level_advances_one_step_per_call() {
        let mut p = GameProgress::new();
        for (id, _) in CATALOG {
            p = p.mark_complete(id, 0.0);
        }
        p = p.update_level(&CATALOG);
        assert_eq!(p.level, 2);
        p = p.update_level(&CATALOG);
        assert_eq!(p.level, 3);
        p = p.update_level(&CATALOG);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn test_later_tier_cleared_first_does_not_skip() {
        let mut p = GameProgress::new();
        for id in ["b1", "b2"] {
            p = p.mark_complete(id, 0.0);
        }
        p = p.update_level(&CATALOG);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_level_never_regresses() {
        let mut p = GameProgress::new();
        p.level = 3;
        p = p.update_level(&CATALOG);
        assert_eq!(p.level, 3);
        let empty: [(&str, u32); 0] = [];
        p = p.update_level(&empty);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn test_tier_summary() {
        let p = GameProgress::new()
            .mark_complete("a1", 0.0)
            .mark_complete("b1", 0.0);
        let summary = p.tier_summary(&CATALOG);
        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary[0],
            TierProgress {
                tier: 1,
                completed: 1,
                total: 3,
                unlocked: true
            }
        );
        assert!(!summary[1].unlocked);
        assert_eq!(summary[1].completed, 1);
        assert!(!summary[2].is_cleared());
        assert!(!p.is_all_complete(&CATALOG));
    }

    #[test]
    fn test_json_field_names() {
        let p = GameProgress::new().increment_attempts("a1", 5.0);
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["totalCompleted"], 0);
        assert_eq!(value["level"], 1);
        assert_eq!(value["satellites"]["a1"]["lastAttempt"], 5.0);
        assert_eq!(value["satellites"]["a1"]["attempts"], 1);
    }

    #[test]
    fn test_completed_ids() {
        let p = GameProgress::new()
            .mark_complete("b1", 0.0)
            .increment_attempts("a1", 0.0)
            .mark_complete("a2", 0.0);
        let ids: Vec<_> = p.completed_ids().collect();
        assert_eq!(ids, vec!["a2", "b1"]);
    }
}
