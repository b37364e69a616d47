//! Lookahead window filtering.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::LegRecord;

/// Closed interval `[start, end]` of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// `[now, now + lookahead]`, with the end clamped to the last
    /// representable instant.
    pub fn lookahead(now: DateTime<Utc>, lookahead: Duration) -> Self {
        Self {
            start: now,
            end: now
                .checked_add_signed(lookahead)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Both bounds inclusive.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    /// A leg without an effective time is never admitted.
    pub fn admits(&self, leg: &LegRecord) -> bool {
        leg.effective_time.is_some_and(|t| self.contains(t))
    }

    /// Keep only admitted legs, preserving order. Returns how many were dropped.
    pub fn retain(&self, legs: &mut Vec<LegRecord>) -> usize {
        let before = legs.len();
        legs.retain(|leg| self.admits(leg));
        before - legs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn leg_at(t: Option<DateTime<Utc>>) -> LegRecord {
        LegRecord::arrival("AR1", "LV-A", "AEP", t)
    }

    #[test]
    fn bounds_are_inclusive() {
        let w = TimeWindow::lookahead(now(), Duration::hours(24));
        assert!(w.contains(now()));
        assert!(w.contains(now() + Duration::hours(24)));
        assert!(!w.contains(now() - Duration::seconds(1)));
        assert!(!w.contains(now() + Duration::hours(24) + Duration::seconds(1)));
    }

    #[test]
    fn huge_lookahead_clamps_instead_of_overflowing() {
        let w = TimeWindow::lookahead(now(), Duration::MAX);
        assert_eq!(w.end, DateTime::<Utc>::MAX_UTC);
        assert!(w.contains(now() + Duration::days(365 * 1000)));
    }

    #[test]
    fn missing_time_is_rejected() {
        let w = TimeWindow::lookahead(now(), Duration::hours(24));
        assert!(!w.admits(&leg_at(None)));
        assert!(w.admits(&leg_at(Some(now() + Duration::hours(3)))));
    }

    #[test]
    fn retain_preserves_order_and_counts_drops() {
        let w = TimeWindow::lookahead(now(), Duration::hours(24));
        let mut legs = vec![
            leg_at(Some(now() + Duration::hours(5))),
            leg_at(None),
            leg_at(Some(now() - Duration::hours(1))),
            leg_at(Some(now() + Duration::hours(1))),
        ];
        let dropped = w.retain(&mut legs);
        assert_eq!(dropped, 2);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].effective_time, Some(now() + Duration::hours(5)));
        assert_eq!(legs[1].effective_time, Some(now() + Duration::hours(1)));
    }
}
