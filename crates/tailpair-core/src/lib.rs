//! tailpair core library
//!
//! Builds a rotation board for one airline at one airport: provider flight
//! objects are extracted into legs, filtered to a lookahead window, paired by
//! aircraft registration and presented as a sorted table or CSV.

pub mod config;
pub mod cycle;
pub mod domain;
pub mod extract;
pub mod fakes;
pub mod metrics;
pub mod obs;
pub mod pairing;
pub mod present;
pub mod source;
pub mod telemetry;
pub mod window;

pub use config::CycleConfig;
pub use cycle::{run_cycle, DirectionStats, Notice, ScheduleReport};
pub use domain::{
    canonical_flight_number, Direction, ExceptionSet, ExportError, ExtractionError, LegRecord,
    LegSide, RotationRow, SourceError, SourceResult,
};
pub use extract::{extract_batch, extract_leg, ExtractionBatch, ProviderFlight};
pub use fakes::MemorySource;
pub use metrics::METRICS;
pub use pairing::pair;
pub use present::{
    format_hhmm, render_table, sort_rows, to_csv_string, write_csv, DisplayRow, ScheduleSummary,
    CSV_HEADER,
};
pub use source::{schedule_entries, ScheduleSource};
pub use telemetry::init_tracing;
pub use window::TimeWindow;

/// tailpair version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
