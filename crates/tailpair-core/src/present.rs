//! Presentation: ordering, summary counts, text table and CSV export.
//!
//! Rows keep full UTC timestamps until this point; they are only reduced to
//! `HH:MM` in the display offset when rendered, so ordering across midnight
//! stays chronological.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ExportError, RotationRow};

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "llegada", "salida", "STA", "ETA", "origen", "destino", "matricula",
];

/// Table header shown to operators.
pub const TABLE_HEADER: [&str; 7] = [
    "Llegada",
    "Salida",
    "STA",
    "ETA",
    "Origen",
    "Destino",
    "Matrícula",
];

/// Stable sort by arrival time, else departure time. Rows with no time go last.
pub fn sort_rows(rows: &mut [RotationRow]) {
    rows.sort_by_key(|row| (row.display_time().is_none(), row.display_time()));
}

/// Counts shown above the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total: usize,
    /// Rows with a non-empty arrival flight number.
    pub arrivals: usize,
    /// Rows with a non-empty departure flight number.
    pub departures: usize,
}

impl ScheduleSummary {
    pub fn from_rows(rows: &[RotationRow]) -> Self {
        let non_empty = |n: Option<&str>| n.is_some_and(|n| !n.is_empty());
        Self {
            total: rows.len(),
            arrivals: rows
                .iter()
                .filter(|r| non_empty(r.arrival_flight_number()))
                .count(),
            departures: rows
                .iter()
                .filter(|r| non_empty(r.departure_flight_number()))
                .count(),
        }
    }
}

/// A row reduced to the seven display strings. Absent values are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub arrival_flight: String,
    pub departure_flight: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub origin: String,
    pub destination: String,
    pub registration: String,
}

impl DisplayRow {
    pub fn new(row: &RotationRow, offset: FixedOffset) -> Self {
        let text = |s: Option<&str>| s.unwrap_or_default().to_string();
        Self {
            arrival_flight: text(row.arrival_flight_number()),
            departure_flight: text(row.departure_flight_number()),
            arrival_time: format_hhmm(row.arrival_time(), offset),
            departure_time: format_hhmm(row.departure_time(), offset),
            origin: text(row.origin()),
            destination: text(row.destination()),
            registration: row.registration().to_string(),
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        [
            &self.arrival_flight,
            &self.departure_flight,
            &self.arrival_time,
            &self.departure_time,
            &self.origin,
            &self.destination,
            &self.registration,
        ]
    }
}

/// `HH:MM` in the given offset, or empty.
pub fn format_hhmm(t: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    t.map(|t| t.with_timezone(&offset).format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn display_rows(rows: &[RotationRow], offset: FixedOffset) -> Vec<DisplayRow> {
    rows.iter().map(|r| DisplayRow::new(r, offset)).collect()
}

/// Render an aligned plain-text table.
pub fn render_table(rows: &[RotationRow], offset: FixedOffset) -> String {
    let display = display_rows(rows, offset);

    let mut widths = TABLE_HEADER.map(|h| h.chars().count());
    for row in &display {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 7]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = line(TABLE_HEADER);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &display {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    out
}

/// Write the schedule as CSV. The header is written even with no rows.
pub fn write_csv<W: Write>(
    writer: W,
    rows: &[RotationRow],
    offset: FixedOffset,
) -> Result<W, ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for row in display_rows(rows, offset) {
        csv.write_record(row.cells())?;
    }
    csv.flush()?;

    csv.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

pub fn to_csv_string(rows: &[RotationRow], offset: FixedOffset) -> Result<String, ExportError> {
    let bytes = write_csv(Vec::new(), rows, offset)?;
    Ok(String::from_utf8(bytes)?)
}
