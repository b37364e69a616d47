//! Structured observability hooks for the refresh cycle.
//!
//! This module provides:
//! - A cycle-scoped tracing span, attached to the cycle future
//! - Emission functions for key lifecycle events: start, fetch failure,
//!   direction extracted, finish

use tracing::info;

use crate::domain::Direction;

/// Span tagged with the cycle id.
pub fn cycle_span(cycle_id: &str) -> tracing::Span {
    tracing::info_span!("tailpair.cycle", cycle_id = %cycle_id)
}

/// Emit event: cycle started for an airport/airline pair.
pub fn emit_cycle_started(cycle_id: &str, airport: &str, airline: &str) {
    info!(event = "cycle.started", cycle_id = %cycle_id, airport = %airport, airline = %airline);
}

/// Emit event: one direction could not be retrieved (warning level).
pub fn emit_fetch_failed(direction: Direction, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "fetch.failed", direction = %direction, error = %error);
}

/// Emit event: one direction extracted and filtered.
pub fn emit_direction_extracted(
    direction: Direction,
    received: usize,
    kept: usize,
    out_of_window: usize,
) {
    info!(
        event = "direction.extracted",
        direction = %direction,
        received = received,
        kept = kept,
        out_of_window = out_of_window,
    );
}

/// Emit event: cycle finished with row counts.
pub fn emit_cycle_finished(cycle_id: &str, rows: usize, paired: usize, duration_ms: u64) {
    info!(
        event = "cycle.finished",
        cycle_id = %cycle_id,
        rows = rows,
        paired = paired,
        duration_ms = duration_ms,
    );
}
