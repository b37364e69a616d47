//! Global atomic counters for tailpair observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a refresh cycle).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters: no allocations, no locking.
pub struct Metrics {
    cycles_run: AtomicU64,
    fetch_failures: AtomicU64,
    records_skipped: AtomicU64,
    rows_emitted: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            cycles_run: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            rows_emitted: AtomicU64::new(0),
        }
    }

    /// Increment the cycles-run counter by one.
    pub fn inc_cycles(&self) {
        self.cycles_run.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "cycles_run", "counter incremented");
    }

    /// Increment the fetch-failures counter by one.
    pub fn inc_fetch_failures(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "fetch_failures", "counter incremented");
    }

    /// Add malformed records skipped during extraction.
    pub fn add_records_skipped(&self, n: u64) {
        self.records_skipped.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "records_skipped", n, "counter incremented");
    }

    /// Add rows produced by the pairing engine.
    pub fn add_rows_emitted(&self, n: u64) {
        self.rows_emitted.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "rows_emitted", n, "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            cycles_run = self.cycles_run(),
            fetch_failures = self.fetch_failures(),
            records_skipped = self.records_skipped(),
            rows_emitted = self.rows_emitted(),
        );
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> u64 {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped.load(Ordering::Relaxed)
    }

    pub fn rows_emitted(&self) -> u64 {
        self.rows_emitted.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.cycles_run.store(0, Ordering::Relaxed);
        self.fetch_failures.store(0, Ordering::Relaxed);
        self.records_skipped.store(0, Ordering::Relaxed);
        self.rows_emitted.store(0, Ordering::Relaxed);
    }
}
