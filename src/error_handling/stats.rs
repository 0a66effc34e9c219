//! Degradation statistics tracking.
//!
//! Counts, per signal source, how often a fetch fell back to its empty default
//! and how often a domain analysis hit an unexpected fault.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::SignalSource;

/// Thread-safe degradation counters.
///
/// All sources are initialized to zero on creation so lookups never miss.
/// Shareable across tasks behind an `Arc`.
#[derive(Debug)]
pub struct DegradationStats {
    degraded: HashMap<SignalSource, AtomicUsize>,
    faults: AtomicUsize,
}

impl Default for DegradationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationStats {
    pub fn new() -> Self {
        let degraded = SignalSource::iter()
            .map(|source| (source, AtomicUsize::new(0)))
            .collect();
        DegradationStats {
            degraded,
            faults: AtomicUsize::new(0),
        }
    }

    /// Records one degraded fetch for `source`.
    pub fn increment_degraded(&self, source: SignalSource) {
        if let Some(counter) = self.degraded.get(&source) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment degradation counter for {:?} which is not in the map",
                source
            );
        }
    }

    /// Records one unexpected fault caught at the orchestrator boundary.
    pub fn increment_fault(&self) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of degraded fetches recorded for `source`.
    pub fn degraded_count(&self, source: SignalSource) -> usize {
        self.degraded
            .get(&source)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of unexpected faults recorded.
    pub fn fault_count(&self) -> usize {
        self.faults.load(Ordering::SeqCst)
    }

    /// Total degraded fetches across all sources.
    pub fn total_degraded(&self) -> usize {
        SignalSource::iter().map(|s| self.degraded_count(s)).sum()
    }

    /// Logs a summary of the non-zero counters.
    pub fn log_summary(&self) {
        let total = self.total_degraded();
        if total == 0 && self.fault_count() == 0 {
            log::info!("All signal sources answered without degradation");
            return;
        }

        log::info!("Degraded signal fetches: {total}");
        for source in SignalSource::iter() {
            let count = self.degraded_count(source);
            if count > 0 {
                log::info!("   {source}: {count}");
            }
        }
        if self.fault_count() > 0 {
            log::warn!("Unexpected analysis faults: {}", self.fault_count());
        }
    }
}
