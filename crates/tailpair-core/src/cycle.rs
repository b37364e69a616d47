//! The retrieval cycle: fetch both directions, extract, filter, pair, sort.
//!
//! A failed direction degrades to zero legs plus a [`Notice`]; nothing in
//! here returns an error to the caller.

use std::time::Instant;

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::CycleConfig;
use crate::domain::{Direction, ExportError, LegRecord, RotationRow, SourceResult};
use crate::extract::extract_batch;
use crate::metrics::METRICS;
use crate::obs;
use crate::pairing::pair;
use crate::present::{render_table, sort_rows, to_csv_string, ScheduleSummary};
use crate::source::ScheduleSource;
use crate::window::TimeWindow;

/// A condition worth showing to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FetchFailed { direction: Direction, message: String },
    SkippedRecords { direction: Direction, count: usize },
    NoFlights,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::FetchFailed { direction, message } => {
                write!(f, "could not retrieve {direction}: {message}")
            }
            Notice::SkippedRecords { direction, count } => {
                write!(f, "skipped {count} unreadable {direction} record(s)")
            }
            Notice::NoFlights => f.write_str("no flights found in the lookahead window"),
        }
    }
}

/// Per-direction bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionStats {
    pub direction: Direction,
    pub received: usize,
    pub foreign: usize,
    pub malformed: usize,
    pub out_of_window: usize,
    pub kept: usize,
}

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct ScheduleReport {
    pub cycle_id: String,
    pub airport: String,
    pub airline: String,
    pub window: TimeWindow,
    pub display_offset: FixedOffset,
    /// Sorted by arrival time, else departure time.
    pub rows: Vec<RotationRow>,
    pub summary: ScheduleSummary,
    pub stats: Vec<DirectionStats>,
    pub notices: Vec<Notice>,
}

impl ScheduleReport {
    /// False when neither direction yielded a leg in the window.
    pub fn has_flights(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Human-readable description of the searched window.
    pub fn window_description(&self) -> String {
        let fmt = |t: DateTime<Utc>| {
            t.with_timezone(&self.display_offset)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        };
        format!(
            "{} flights at {} from {} to {}",
            self.airline,
            self.airport,
            fmt(self.window.start),
            fmt(self.window.end)
        )
    }

    pub fn table(&self) -> String {
        render_table(&self.rows, self.display_offset)
    }

    pub fn csv(&self) -> Result<String, ExportError> {
        to_csv_string(&self.rows, self.display_offset)
    }
}

/// Run one full cycle against `source`, anchored at `now`.
pub async fn run_cycle<S>(source: &S, config: &CycleConfig, now: DateTime<Utc>) -> ScheduleReport
where
    S: ScheduleSource + ?Sized,
{
    let cycle_id = Uuid::new_v4().to_string();
    let span = obs::cycle_span(&cycle_id);
    run_cycle_inner(source, config, now, cycle_id)
        .instrument(span)
        .await
}

async fn run_cycle_inner<S>(
    source: &S,
    config: &CycleConfig,
    now: DateTime<Utc>,
    cycle_id: String,
) -> ScheduleReport
where
    S: ScheduleSource + ?Sized,
{
    let started = Instant::now();
    obs::emit_cycle_started(&cycle_id, &config.airport, &config.airline);

    let window = TimeWindow::lookahead(now, config.lookahead());

    // Both directions must be complete before pairing starts.
    let (arrivals_raw, departures_raw) = futures::future::join(
        source.fetch(&config.airport, Direction::Arrival),
        source.fetch(&config.airport, Direction::Departure),
    )
    .await;

    let mut notices = Vec::new();
    let (arrivals, arrival_stats) = collect_direction(
        arrivals_raw,
        Direction::Arrival,
        config,
        &window,
        &mut notices,
    );
    let (departures, departure_stats) = collect_direction(
        departures_raw,
        Direction::Departure,
        config,
        &window,
        &mut notices,
    );

    let mut rows = if arrivals.is_empty() && departures.is_empty() {
        notices.push(Notice::NoFlights);
        Vec::new()
    } else {
        pair(
            arrivals,
            departures,
            &config.exceptions.canonical(&config.airline),
        )
    };
    sort_rows(&mut rows);

    let summary = ScheduleSummary::from_rows(&rows);
    let paired = rows.iter().filter(|r| r.is_paired()).count();

    METRICS.inc_cycles();
    METRICS.add_rows_emitted(rows.len() as u64);
    obs::emit_cycle_finished(
        &cycle_id,
        rows.len(),
        paired,
        started.elapsed().as_millis() as u64,
    );

    ScheduleReport {
        cycle_id,
        airport: config.airport.clone(),
        airline: config.airline.clone(),
        window,
        display_offset: config.display_offset(),
        rows,
        summary,
        stats: vec![arrival_stats, departure_stats],
        notices,
    }
}

fn collect_direction(
    fetched: SourceResult<Vec<Value>>,
    direction: Direction,
    config: &CycleConfig,
    window: &TimeWindow,
    notices: &mut Vec<Notice>,
) -> (Vec<LegRecord>, DirectionStats) {
    let raw = match fetched {
        Ok(raw) => raw,
        Err(err) => {
            METRICS.inc_fetch_failures();
            obs::emit_fetch_failed(direction, &err);
            notices.push(Notice::FetchFailed {
                direction,
                message: err.to_string(),
            });
            Vec::new()
        }
    };

    let mut batch = extract_batch(&raw, direction, &config.airline);
    if batch.malformed > 0 {
        notices.push(Notice::SkippedRecords {
            direction,
            count: batch.malformed,
        });
    }
    let out_of_window = window.retain(&mut batch.legs);

    let stats = DirectionStats {
        direction,
        received: raw.len(),
        foreign: batch.foreign,
        malformed: batch.malformed,
        out_of_window,
        kept: batch.legs.len(),
    };
    obs::emit_direction_extracted(direction, stats.received, stats.kept, out_of_window);

    (batch.legs, stats)
}
