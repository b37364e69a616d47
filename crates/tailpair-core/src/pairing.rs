//! Rotation pairing: join arrivals and departures by aircraft registration.
//!
//! Three passes, always iterating the input vectors in provider order:
//!
//! 1. **Exceptions**: arrivals then departures; every leg whose flight number
//!    is in the [`ExceptionSet`] becomes a solo row and its registration is
//!    consumed.
//! 2. **Arrivals**: each remaining arrival takes the *first* remaining
//!    departure with the same registration. With no match, or when its
//!    registration is already consumed, the arrival becomes a solo row. The
//!    registration is consumed either way.
//! 3. **Residual departures**: every departure still unclaimed becomes a solo
//!    row.
//!
//! A consumed registration can no longer join two legs; it never removes a
//! leg from the output, so every input leg lands in exactly one row.
//! Legs with an empty registration have no usable join key: they are always
//! emitted solo and never consume anything.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{ExceptionSet, LegRecord, RotationRow};

/// Registrations that may no longer be used to join legs.
#[derive(Debug, Default)]
struct Consumed(HashSet<String>);

impl Consumed {
    fn mark(&mut self, leg: &LegRecord) {
        if leg.has_registration() {
            self.0.insert(leg.registration.clone());
        }
    }

    /// Whether `leg` can still be joined to a leg of the other direction.
    fn is_joinable(&self, leg: &LegRecord) -> bool {
        leg.has_registration() && !self.0.contains(&leg.registration)
    }
}

/// Pair arrivals with departures into the reconciled schedule.
///
/// Total over any input, including empty vectors. Output order is the order
/// in which rows are produced by the passes above; callers sort for display.
pub fn pair(
    arrivals: Vec<LegRecord>,
    departures: Vec<LegRecord>,
    exceptions: &ExceptionSet,
) -> Vec<RotationRow> {
    let mut arrivals: Vec<Option<LegRecord>> = arrivals.into_iter().map(Some).collect();
    let mut departures: Vec<Option<LegRecord>> = departures.into_iter().map(Some).collect();
    let mut consumed = Consumed::default();
    let mut rows = Vec::with_capacity(arrivals.len() + departures.len());

    // Exceptions
    for slot in arrivals.iter_mut().chain(departures.iter_mut()) {
        let is_exception = slot
            .as_ref()
            .is_some_and(|leg| exceptions.contains(&leg.flight_number));
        if !is_exception {
            continue;
        }
        if let Some(leg) = slot.take() {
            consumed.mark(&leg);
            rows.push(RotationRow::solo(leg));
        }
    }
    let exception_rows = rows.len();

    // Arrivals, first matching departure wins
    let mut paired = 0usize;
    for slot in arrivals.iter_mut() {
        let Some(arrival) = slot.take() else {
            continue;
        };

        let matched = if consumed.is_joinable(&arrival) {
            departures
                .iter_mut()
                .find(|d| {
                    d.as_ref().is_some_and(|d| {
                        d.registration == arrival.registration
                            && !exceptions.contains(&d.flight_number)
                    })
                })
                .and_then(Option::take)
        } else {
            None
        };

        consumed.mark(&arrival);
        match matched {
            Some(departure) => {
                paired += 1;
                rows.push(RotationRow::rotation(arrival, departure));
            }
            None => rows.push(RotationRow::solo(arrival)),
        }
    }

    // Departures nobody claimed
    for departure in departures.into_iter().flatten() {
        consumed.mark(&departure);
        rows.push(RotationRow::solo(departure));
    }

    debug!(
        event = "pairing.completed",
        rows = rows.len(),
        exception_rows,
        paired,
    );
    rows
}
