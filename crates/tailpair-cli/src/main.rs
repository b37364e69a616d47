//! tailpair - rotation board CLI
//!
//! Shows a home airline's arrivals and departures at a home airport over the
//! next 24 hours, with inbound and outbound legs of the same aircraft on one
//! line.
//!
//! ## Commands
//!
//! - `refresh`: fetch the live schedule and print the board
//! - `replay`: build the board from saved provider documents

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tailpair_core::{run_cycle, CycleConfig, ExceptionSet, ScheduleReport, ScheduleSource, METRICS};
use tailpair_fetch::{FetchConfig, FileSource, Fr24Client};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "tailpair")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Airline rotation board: arrivals paired with departures by registration", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the live schedule and print the board
    Refresh {
        #[command(flatten)]
        board: BoardArgs,

        /// Provider API base URL
        #[arg(long, env = "TAILPAIR_PROVIDER_URL")]
        provider_url: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "15")]
        timeout_secs: u64,

        /// Entries requested per direction
        #[arg(long, default_value = "100")]
        limit: u32,
    },

    /// Build the board from saved provider documents
    Replay {
        #[command(flatten)]
        board: BoardArgs,

        /// Saved arrivals document (full response or bare array)
        #[arg(long)]
        arrivals: Option<PathBuf>,

        /// Saved departures document (full response or bare array)
        #[arg(long)]
        departures: Option<PathBuf>,

        /// Window anchor, RFC 3339 (default: now)
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
}

const MAX_LOOKAHEAD_HOURS: i64 = 366 * 24;

/// Settings shared by every board-producing command
#[derive(Args, Debug, Clone)]
struct BoardArgs {
    /// Home airport IATA code
    #[arg(long, default_value = "COR")]
    airport: String,

    /// Home airline IATA code
    #[arg(long, default_value = "AR")]
    airline: String,

    /// Lookahead window in hours (at most a year)
    #[arg(long, default_value = "24", value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKAHEAD_HOURS))]
    hours: u32,

    /// Flight number that must never be paired, with or without the airline
    /// prefix (repeatable; replaces the defaults)
    #[arg(long = "exception", value_name = "FLIGHT")]
    exceptions: Vec<String>,

    /// Display times at this offset from UTC, in minutes
    #[arg(long, default_value = "-180", allow_hyphen_values = true)]
    offset_minutes: i32,

    /// Also write the board as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl BoardArgs {
    fn cycle_config(&self) -> CycleConfig {
        let exceptions = if self.exceptions.is_empty() {
            ExceptionSet::default()
        } else {
            ExceptionSet::new(self.exceptions.iter().map(String::as_str))
        };
        CycleConfig::new(&self.airport, &self.airline)
            .with_lookahead(Duration::hours(i64::from(self.hours)))
            .with_exceptions(exceptions)
            .with_display_offset_minutes(self.offset_minutes)
    }
}

fn parse_instant(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tailpair_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Refresh {
            board,
            provider_url,
            timeout_secs,
            limit,
        } => {
            let mut fetch = match provider_url {
                Some(url) => FetchConfig::new(&url),
                None => FetchConfig::from_env(),
            };
            fetch = fetch
                .with_timeout(std::time::Duration::from_secs(timeout_secs))
                .with_page_limit(limit);
            let client = Fr24Client::new(fetch).context("Failed to create provider client")?;
            cmd_board(&client, &board, Utc::now()).await?
        }
        Commands::Replay {
            board,
            arrivals,
            departures,
            now,
        } => {
            let source = FileSource::new(arrivals, departures);
            cmd_board(&source, &board, now.unwrap_or_else(Utc::now)).await?
        }
    };

    METRICS.flush();
    Ok(())
}

/// Run one cycle, print the board and optionally export it.
async fn cmd_board<S>(source: &S, board: &BoardArgs, now: DateTime<Utc>) -> Result<()>
where
    S: ScheduleSource + ?Sized,
{
    let config = board.cycle_config();
    let report = run_cycle(source, &config, now).await;

    print!("{}", render_board(&report));

    if let Some(path) = &board.csv {
        if report.has_flights() {
            write_csv(&report, path)?;
            println!("Wrote {} row(s) to {}", report.rows.len(), path.display());
        }
    }
    Ok(())
}

/// Everything printed for one cycle, in display order.
fn render_board(report: &ScheduleReport) -> String {
    let mut out = format!("Searching {}\n", report.window_description());

    for notice in &report.notices {
        out.push_str(&format!("warning: {notice}\n"));
    }

    if !report.has_flights() {
        out.push_str(&format!(
            "No {} flights found at {} in the lookahead window\n",
            report.airline, report.airport
        ));
        return out;
    }

    let s = report.summary;
    out.push_str(&format!(
        "\nTotal: {}  Arrivals: {}  Departures: {}\n\n",
        s.total, s.arrivals, s.departures
    ));
    out.push_str(&report.table());
    out
}

fn write_csv(report: &ScheduleReport, path: &Path) -> Result<()> {
    let csv = report.csv().context("Failed to serialise board as CSV")?;
    std::fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(event = "export.written", path = %path.display(), rows = report.rows.len());
    Ok(())
}
