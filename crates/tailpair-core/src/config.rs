//! Per-cycle configuration.
//!
//! Everything a refresh cycle needs is carried explicitly in [`CycleConfig`]
//! and handed to [`run_cycle`](crate::cycle::run_cycle); nothing is read from
//! process-wide state.

use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ExceptionSet;

/// Settings for one retrieval-and-render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Home airport IATA code.
    pub airport: String,
    /// Home airline IATA code; also the flight-number prefix.
    pub airline: String,
    /// Length of the window starting at "now", in minutes.
    pub lookahead_minutes: i64,
    /// Flights that are never paired.
    pub exceptions: ExceptionSet,
    /// Offset from UTC used when formatting times, in minutes.
    pub display_offset_minutes: i32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            airport: "COR".to_string(),
            airline: "AR".to_string(),
            lookahead_minutes: 24 * 60,
            exceptions: ExceptionSet::default(),
            // Córdoba does not observe DST.
            display_offset_minutes: -180,
        }
    }
}

impl CycleConfig {
    /// Create config for a specific airport and airline with default window.
    pub fn new(airport: &str, airline: &str) -> Self {
        CycleConfig {
            airport: airport.to_uppercase(),
            airline: airline.to_uppercase(),
            ..Self::default()
        }
    }

    pub fn with_lookahead(mut self, lookahead: Duration) -> Self {
        self.lookahead_minutes = lookahead.num_minutes();
        self
    }

    /// Exception numbers are normalised with the airline prefix, so `1550`
    /// and `AR1550` name the same flight.
    pub fn with_exceptions(mut self, exceptions: ExceptionSet) -> Self {
        self.exceptions = exceptions.canonical(&self.airline);
        self
    }

    pub fn with_display_offset_minutes(mut self, minutes: i32) -> Self {
        self.display_offset_minutes = minutes;
        self
    }

    /// Window length; negative values mean an empty window and values beyond
    /// what chrono can represent saturate.
    pub fn lookahead(&self) -> Duration {
        Duration::try_minutes(self.lookahead_minutes.max(0)).unwrap_or(Duration::MAX)
    }

    /// Display offset; out-of-range values fall back to UTC.
    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    minutes = self.display_offset_minutes,
                    "display offset out of range, using UTC"
                );
                Utc.fix()
            })
    }
}
