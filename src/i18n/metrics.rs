//! Lookup metrics for a translation store.
//!
//! Counts how often lookups are answered directly, answered from the default
//! language, or not answered at all. Useful for spotting untranslated strings.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters owned by a single store.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Number of `get_value` calls
    lookups: AtomicUsize,

    /// Number of lookups answered by the default language
    fallbacks: AtomicUsize,

    /// Number of lookups that resolved to an empty string
    misses: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup.
    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup served by the default language.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that found no text.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let fallbacks = self.fallbacks();
        let misses = self.misses();

        let rate = |count: usize| {
            if lookups > 0 {
                (count as f64 / lookups as f64) * 100.0
            } else {
                0.0
            }
        };

        MetricsReport {
            lookups,
            fallbacks,
            misses,
            fallback_rate: rate(fallbacks),
            miss_rate: rate(misses),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of lookups
    pub lookups: usize,

    /// Number of lookups served by the default language
    pub fallbacks: usize,

    /// Number of lookups that found no text
    pub misses: usize,

    /// Fallback rate as a percentage (0-100)
    pub fallback_rate: f64,

    /// Miss rate as a percentage (0-100)
    pub miss_rate: f64,
}
