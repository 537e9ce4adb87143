//! Metrics registry for planfix
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one session
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Configuration updates that replaced the directive set
    updates_applied: AtomicU64,
    /// Configuration updates rejected by the parser
    updates_rejected: AtomicU64,
    /// Relations whose candidate list a directive restricted
    relations_filtered: AtomicU64,
    /// Candidate indices removed across all relations
    candidates_removed: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_updates_applied(&self) {
        self.updates_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updates_rejected(&self) {
        self.updates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_relations_filtered(&self) {
        self.relations_filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_candidates_removed(&self, count: u64) {
        self.candidates_removed.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            updates_rejected: self.updates_rejected.load(Ordering::Relaxed),
            relations_filtered: self.relations_filtered.load(Ordering::Relaxed),
            candidates_removed: self.candidates_removed.load(Ordering::Relaxed),
        }
    }
}

/// Copy of the counters, serializable for the session's `metrics` op
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub updates_applied: u64,
    pub updates_rejected: u64,
    pub relations_filtered: u64,
    pub candidates_removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let metrics = MetricsRegistry::new();
        metrics.increment_updates_applied();
        metrics.increment_updates_applied();
        metrics.increment_updates_rejected();
        metrics.increment_relations_filtered();
        metrics.add_candidates_removed(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.updates_applied, 2);
        assert_eq!(snapshot.updates_rejected, 1);
        assert_eq!(snapshot.relations_filtered, 1);
        assert_eq!(snapshot.candidates_removed, 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(MetricsRegistry::new().snapshot()).unwrap();
        assert_eq!(json["updates_applied"], 0);
        assert_eq!(json["candidates_removed"], 0);
    }
}
