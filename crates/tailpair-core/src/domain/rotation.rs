//! Output rows of the reconciled schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::leg::{Direction, LegRecord};

/// One side (inbound or outbound) of a rotation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegSide {
    pub flight_number: String,
    pub time: Option<DateTime<Utc>>,
    /// Origin on the arrival side, destination on the departure side.
    pub airport: String,
}

impl From<LegRecord> for LegSide {
    fn from(leg: LegRecord) -> Self {
        Self {
            flight_number: leg.flight_number,
            time: leg.effective_time,
            airport: leg.other_airport,
        }
    }
}

/// One aircraft rotation at the home airport: inbound, outbound, or both.
///
/// Rows can only be built through the constructors below, so at least one
/// side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationRow {
    arrival: Option<LegSide>,
    departure: Option<LegSide>,
    registration: String,
}

impl RotationRow {
    /// A row holding a single leg, placed on the side its direction dictates.
    pub fn solo(leg: LegRecord) -> Self {
        let registration = leg.registration.clone();
        match leg.direction {
            Direction::Arrival => Self {
                arrival: Some(leg.into()),
                departure: None,
                registration,
            },
            Direction::Departure => Self {
                arrival: None,
                departure: Some(leg.into()),
                registration,
            },
        }
    }

    /// A combined inbound + outbound row. The arrival's registration is kept.
    pub fn rotation(arrival: LegRecord, departure: LegRecord) -> Self {
        debug_assert_eq!(arrival.direction, Direction::Arrival);
        debug_assert_eq!(departure.direction, Direction::Departure);
        let registration = arrival.registration.clone();
        Self {
            arrival: Some(arrival.into()),
            departure: Some(departure.into()),
            registration,
        }
    }

    pub fn arrival(&self) -> Option<&LegSide> {
        self.arrival.as_ref()
    }

    pub fn departure(&self) -> Option<&LegSide> {
        self.departure.as_ref()
    }

    pub fn registration(&self) -> &str {
        &self.registration
    }

    pub fn is_paired(&self) -> bool {
        self.arrival.is_some() && self.departure.is_some()
    }

    pub fn arrival_flight_number(&self) -> Option<&str> {
        self.arrival.as_ref().map(|s| s.flight_number.as_str())
    }

    pub fn departure_flight_number(&self) -> Option<&str> {
        self.departure.as_ref().map(|s| s.flight_number.as_str())
    }

    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.arrival.as_ref().and_then(|s| s.time)
    }

    pub fn departure_time(&self) -> Option<DateTime<Utc>> {
        self.departure.as_ref().and_then(|s| s.time)
    }

    pub fn origin(&self) -> Option<&str> {
        self.arrival.as_ref().map(|s| s.airport.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.departure.as_ref().map(|s| s.airport.as_str())
    }

    /// Arrival time if present, else departure time. Used for ordering.
    pub fn display_time(&self) -> Option<DateTime<Utc>> {
        self.arrival_time().or_else(|| self.departure_time())
    }

    /// Number of legs this row was built from (1 or 2).
    pub fn leg_count(&self) -> usize {
        usize::from(self.arrival.is_some()) + usize::from(self.departure.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap())
    }

    #[test]
    fn solo_arrival_populates_only_origin() {
        let row = RotationRow::solo(LegRecord::arrival("AR100", "LV-ABC", "AEP", at(10, 0)));
        assert_eq!(row.arrival_flight_number(), Some("AR100"));
        assert_eq!(row.departure_flight_number(), None);
        assert_eq!(row.origin(), Some("AEP"));
        assert_eq!(row.destination(), None);
        assert!(!row.is_paired());
        assert_eq!(row.leg_count(), 1);
    }

    #[test]
    fn solo_departure_populates_only_destination() {
        let row = RotationRow::solo(LegRecord::departure("AR200", "LV-ABC", "MDZ", at(11, 0)));
        assert_eq!(row.arrival(), None);
        assert_eq!(row.destination(), Some("MDZ"));
        assert_eq!(row.display_time(), at(11, 0));
    }

    #[test]
    fn rotation_prefers_arrival_time_for_display() {
        let row = RotationRow::rotation(
            LegRecord::arrival("AR100", "LV-ABC", "AEP", at(10, 0)),
            LegRecord::departure("AR200", "LV-ABC", "MDZ", at(11, 0)),
        );
        assert!(row.is_paired());
        assert_eq!(row.display_time(), at(10, 0));
        assert_eq!(row.registration(), "LV-ABC");
        assert_eq!(row.leg_count(), 2);
    }
}
