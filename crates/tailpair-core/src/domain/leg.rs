//! A single flight leg as seen from the home airport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the home airport a leg touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Arrival,
    Departure,
}

impl Direction {
    /// Provider schedule mode (`arrivals` / `departures`).
    pub fn mode(self) -> &'static str {
        match self {
            Direction::Arrival => "arrivals",
            Direction::Departure => "departures",
        }
    }

    /// Key of the provider time objects relevant to this direction.
    pub fn time_key(self) -> &'static str {
        match self {
            Direction::Arrival => "arrival",
            Direction::Departure => "departure",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mode())
    }
}

/// One direction of one flight operated by the home airline.
///
/// Only the non-home endpoint is stored; the home endpoint is implied by
/// `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegRecord {
    pub direction: Direction,
    /// Canonical `<airline><digits>` form, e.g. `AR1234`. Empty when the
    /// provider sent no number.
    pub flight_number: String,
    /// Estimated time when known, else scheduled time.
    pub effective_time: Option<DateTime<Utc>>,
    /// Origin for an arrival, destination for a departure.
    pub other_airport: String,
    /// Aircraft tail number, empty if unknown.
    pub registration: String,
}

impl LegRecord {
    pub fn arrival(
        flight_number: impl Into<String>,
        registration: impl Into<String>,
        origin: impl Into<String>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            direction: Direction::Arrival,
            flight_number: flight_number.into(),
            effective_time,
            other_airport: origin.into(),
            registration: registration.into(),
        }
    }

    pub fn departure(
        flight_number: impl Into<String>,
        registration: impl Into<String>,
        destination: impl Into<String>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            direction: Direction::Departure,
            flight_number: flight_number.into(),
            effective_time,
            other_airport: destination.into(),
            registration: registration.into(),
        }
    }

    /// True when the tail number is known and usable as a join key.
    pub fn has_registration(&self) -> bool {
        !self.registration.is_empty()
    }
}

/// Normalise a raw provider flight number to `<prefix><digits>`.
///
/// The prefix is stripped at most once before being re-applied, so both
/// `"1234"` and `"AR1234"` become `"AR1234"`. An empty input stays empty.
pub fn canonical_flight_number(prefix: &str, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let bare = raw.strip_prefix(prefix).unwrap_or(raw);
    format!("{prefix}{bare}")
}
