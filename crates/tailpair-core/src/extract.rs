//! Record extraction: provider flight objects to [`LegRecord`]s.
//!
//! The provider document is decoded into a typed intermediate representation
//! once, at this boundary. Every nested object is optional; `null` and absent
//! keys both decode to `None` and end up as empty/absent leg fields. Only a
//! genuine shape mismatch (e.g. a string where a timestamp belongs) makes a
//! record malformed, and that never affects its siblings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{canonical_flight_number, Direction, ExtractionError, LegRecord};
use crate::metrics::METRICS;

// ── provider shape ────────────────────────────────────────────────────────

/// One element of `schedule.<mode>.data`.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderFlight {
    pub flight: Option<FlightBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlightBody {
    pub identification: Option<Identification>,
    pub airline: Option<Airline>,
    pub aircraft: Option<Aircraft>,
    pub airport: Option<Airports>,
    pub time: Option<Times>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Identification {
    pub number: Option<FlightNumberInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlightNumberInfo {
    pub default: Option<String>,
    pub alternative: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Airline {
    pub code: Option<Codes>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Codes {
    pub iata: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Aircraft {
    pub registration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Airports {
    pub origin: Option<AirportRef>,
    pub destination: Option<AirportRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AirportRef {
    pub code: Option<Codes>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Times {
    pub scheduled: Option<TimePair>,
    pub estimated: Option<TimePair>,
}

/// Unix-second timestamps; `0` and `null` both mean unknown.
#[derive(Debug, Default, Deserialize)]
pub struct TimePair {
    pub arrival: Option<i64>,
    pub departure: Option<i64>,
}

impl TimePair {
    fn get(&self, direction: Direction) -> Option<i64> {
        let secs = match direction {
            Direction::Arrival => self.arrival,
            Direction::Departure => self.departure,
        };
        secs.filter(|&s| s != 0)
    }
}

fn iata(codes: Option<&Codes>) -> &str {
    codes.and_then(|c| c.iata.as_deref()).unwrap_or_default()
}

impl FlightBody {
    fn airline_code(&self) -> &str {
        iata(self.airline.as_ref().and_then(|a| a.code.as_ref()))
    }

    fn raw_number(&self) -> &str {
        let number = self.identification.as_ref().and_then(|i| i.number.as_ref());
        number
            .and_then(|n| n.default.as_deref().filter(|s| !s.is_empty()))
            .or_else(|| number.and_then(|n| n.alternative.as_deref()))
            .unwrap_or_default()
    }

    fn registration(&self) -> &str {
        self.aircraft
            .as_ref()
            .and_then(|a| a.registration.as_deref())
            .unwrap_or_default()
    }

    fn other_airport(&self, direction: Direction) -> &str {
        let airports = self.airport.as_ref();
        let endpoint = match direction {
            Direction::Arrival => airports.and_then(|a| a.origin.as_ref()),
            Direction::Departure => airports.and_then(|a| a.destination.as_ref()),
        };
        iata(endpoint.and_then(|e| e.code.as_ref()))
    }

    /// Estimated time when known and non-zero, else scheduled.
    fn effective_time(&self, direction: Direction) -> Option<DateTime<Utc>> {
        let times = self.time.as_ref()?;
        let estimated = times.estimated.as_ref().and_then(|t| t.get(direction));
        let scheduled = times.scheduled.as_ref().and_then(|t| t.get(direction));
        estimated
            .or(scheduled)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

// ── extraction ────────────────────────────────────────────────────────────

/// Turn one raw provider flight into a leg of the home airline.
pub fn extract_leg(
    raw: &Value,
    direction: Direction,
    airline: &str,
) -> Result<LegRecord, ExtractionError> {
    let parsed = ProviderFlight::deserialize(raw)?;
    let body = parsed.flight.unwrap_or_default();

    let code = body.airline_code();
    if code != airline {
        return Err(ExtractionError::ForeignAirline {
            code: code.to_string(),
        });
    }

    Ok(LegRecord {
        direction,
        flight_number: canonical_flight_number(airline, body.raw_number()),
        effective_time: body.effective_time(direction),
        other_airport: body.other_airport(direction).to_string(),
        registration: body.registration().to_string(),
    })
}

/// Outcome of extracting one direction's batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionBatch {
    pub legs: Vec<LegRecord>,
    /// Records operated by another airline.
    pub foreign: usize,
    /// Records skipped because their shape could not be decoded.
    pub malformed: usize,
}

impl ExtractionBatch {
    pub fn seen(&self) -> usize {
        self.legs.len() + self.foreign + self.malformed
    }
}

/// Extract every record of a batch, skipping bad ones without aborting.
pub fn extract_batch(raw: &[Value], direction: Direction, airline: &str) -> ExtractionBatch {
    let mut batch = ExtractionBatch::default();

    for (index, value) in raw.iter().enumerate() {
        match extract_leg(value, direction, airline) {
            Ok(leg) => batch.legs.push(leg),
            Err(err) if err.is_malformed() => {
                debug!(%direction, index, error = %err, "skipping flight record");
                batch.malformed += 1;
            }
            Err(_) => batch.foreign += 1,
        }
    }

    if batch.malformed > 0 {
        METRICS.add_records_skipped(batch.malformed as u64);
        warn!(
            event = "extract.skipped",
            %direction,
            malformed = batch.malformed,
            total = raw.len(),
        );
    }

    batch
}
