//! Schedule reconciliation scenarios, end to end from legs to CSV lines.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tailpair_core::{pair, sort_rows, to_csv_string, ExceptionSet, LegRecord, RotationRow};

fn at(h: u32, m: u32) -> Option<DateTime<Utc>> {
    Some(Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap())
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn csv_lines(rows: &[RotationRow]) -> Vec<String> {
    to_csv_string(rows, utc())
        .expect("csv export")
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn scenario_a_rotation_on_shared_registration() {
    let rows = pair(
        vec![LegRecord::arrival("AR100", "ABC", "AEP", at(10, 0))],
        vec![LegRecord::departure("AR200", "ABC", "MDZ", at(11, 0))],
        &ExceptionSet::default(),
    );
    assert_eq!(csv_lines(&rows), vec!["AR100,AR200,10:00,11:00,AEP,MDZ,ABC"]);
}

#[test]
fn scenario_b_solo_arrival() {
    let rows = pair(
        vec![LegRecord::arrival("AR100", "ABC", "AEP", at(10, 0))],
        vec![],
        &ExceptionSet::default(),
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].departure_flight_number(), None);
    assert_eq!(csv_lines(&rows), vec!["AR100,,10:00,,AEP,,ABC"]);
}

#[test]
fn scenario_c_exception_flights_never_merge() {
    let rows = pair(
        vec![LegRecord::arrival("AR1550", "XYZ", "USH", at(9, 0))],
        vec![LegRecord::departure("AR1551", "XYZ", "USH", at(9, 30))],
        &ExceptionSet::default(),
    );
    assert_eq!(
        csv_lines(&rows),
        vec!["AR1550,,09:00,,USH,,XYZ", ",AR1551,,09:30,,USH,XYZ"]
    );
}

#[test]
fn scenario_d_nothing_in_nothing_out() {
    let rows = pair(vec![], vec![], &ExceptionSet::default());
    assert!(rows.is_empty());
    assert!(csv_lines(&rows).is_empty());
}

#[test]
fn scenario_e_departures_sharing_a_tail_are_both_kept() {
    let rows = pair(
        vec![],
        vec![
            LegRecord::departure("AR300", "DEF", "AEP", at(8, 0)),
            LegRecord::departure("AR302", "DEF", "AEP", at(18, 0)),
        ],
        &ExceptionSet::default(),
    );
    assert_eq!(
        csv_lines(&rows),
        vec![",AR300,,08:00,,AEP,DEF", ",AR302,,18:00,,AEP,DEF"]
    );
}

// ── properties ────────────────────────────────────────────────────────────

fn busy_day() -> (Vec<LegRecord>, Vec<LegRecord>) {
    let arrivals = vec![
        LegRecord::arrival("AR1500", "LV-A", "AEP", at(7, 0)),
        LegRecord::arrival("AR1550", "LV-B", "USH", at(8, 0)),
        LegRecord::arrival("AR1502", "LV-B", "AEP", at(9, 0)),
        LegRecord::arrival("AR1504", "LV-C", "AEP", at(12, 0)),
        LegRecord::arrival("AR1506", "", "IGR", at(13, 0)),
        LegRecord::arrival("AR1508", "LV-A", "AEP", at(19, 0)),
    ];
    let departures = vec![
        LegRecord::departure("AR1501", "LV-A", "AEP", at(8, 0)),
        LegRecord::departure("AR1553", "LV-B", "USH", at(9, 0)),
        LegRecord::departure("AR1503", "LV-B", "AEP", at(10, 0)),
        LegRecord::departure("AR1509", "LV-A", "AEP", at(20, 0)),
        LegRecord::departure("AR1507", "", "IGR", at(14, 0)),
        LegRecord::departure("AR1511", "LV-D", "BRC", at(6, 0)),
    ];
    (arrivals, departures)
}

#[test]
fn every_leg_appears_exactly_once() {
    let (arrivals, departures) = busy_day();
    let mut expected: Vec<String> = arrivals
        .iter()
        .chain(departures.iter())
        .map(|l| l.flight_number.clone())
        .collect();
    expected.sort();

    let rows = pair(arrivals, departures, &ExceptionSet::default());
    let mut seen: Vec<String> = rows
        .iter()
        .flat_map(|r| [r.arrival_flight_number(), r.departure_flight_number()])
        .flatten()
        .map(str::to_string)
        .collect();
    seen.sort();

    assert_eq!(seen, expected);
}

#[test]
fn exception_rows_are_always_solo() {
    let (arrivals, departures) = busy_day();
    let exceptions = ExceptionSet::default();
    let rows = pair(arrivals, departures, &exceptions);

    for row in &rows {
        let touches_exception = [row.arrival_flight_number(), row.departure_flight_number()]
            .into_iter()
            .flatten()
            .any(|n| exceptions.contains(n));
        if touches_exception {
            assert!(!row.is_paired(), "exception flight paired: {row:?}");
        }
    }
}

#[test]
fn first_departure_in_provider_order_wins() {
    let (arrivals, departures) = busy_day();
    let rows = pair(arrivals, departures, &ExceptionSet::default());

    let lv_a: Vec<_> = rows.iter().filter(|r| r.registration() == "LV-A").collect();
    assert_eq!(lv_a[0].arrival_flight_number(), Some("AR1500"));
    assert_eq!(lv_a[0].departure_flight_number(), Some("AR1501"));
    // LV-A is consumed by the first rotation, so the evening legs stay apart.
    assert!(lv_a[1..].iter().all(|r| !r.is_paired()));
}

#[test]
fn exception_tail_blocks_regular_pairing() {
    let (arrivals, departures) = busy_day();
    let rows = pair(arrivals, departures, &ExceptionSet::default());

    let lv_b: Vec<_> = rows.iter().filter(|r| r.registration() == "LV-B").collect();
    assert_eq!(lv_b.len(), 4);
    assert!(lv_b.iter().all(|r| !r.is_paired()));
}

#[test]
fn pairing_is_deterministic() {
    let (a1, d1) = busy_day();
    let (a2, d2) = busy_day();
    assert_eq!(
        pair(a1, d1, &ExceptionSet::default()),
        pair(a2, d2, &ExceptionSet::default())
    );
}

#[test]
fn sorted_output_follows_effective_display_time() {
    let (arrivals, departures) = busy_day();
    let mut rows = pair(arrivals, departures, &ExceptionSet::default());
    sort_rows(&mut rows);

    let times: Vec<_> = rows.iter().map(|r| r.display_time()).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted);
    assert_eq!(rows[0].departure_flight_number(), Some("AR1511"));
}
