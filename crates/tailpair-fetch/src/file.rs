//! File-backed schedule source
//!
//! Replays provider documents saved to disk, one file per direction. A file
//! may hold either the full `airport.json` response or just the bare array of
//! flight objects.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tailpair_core::{schedule_entries, Direction, ScheduleSource, SourceResult};
use tracing::debug;

/// Serves saved provider documents
#[derive(Debug, Clone)]
pub struct FileSource {
    arrivals: Option<PathBuf>,
    departures: Option<PathBuf>,
}

impl FileSource {
    pub fn new(arrivals: Option<PathBuf>, departures: Option<PathBuf>) -> Self {
        FileSource {
            arrivals,
            departures,
        }
    }

    fn path_for(&self, direction: Direction) -> Option<&Path> {
        match direction {
            Direction::Arrival => self.arrivals.as_deref(),
            Direction::Departure => self.departures.as_deref(),
        }
    }

    async fn read_entries(path: &Path, direction: Direction) -> Result<Vec<Value>> {
        let content = tokio::fs::read(path).await?;
        let document: Value = serde_json::from_slice(&content)?;
        debug!(path = %path.display(), %direction, "loaded saved schedule");

        Ok(match document {
            Value::Array(items) => items,
            other => schedule_entries(&other, direction),
        })
    }
}

#[async_trait]
impl ScheduleSource for FileSource {
    /// The airport is implied by the saved document and ignored here.
    async fn fetch(&self, _airport: &str, direction: Direction) -> SourceResult<Vec<Value>> {
        match self.path_for(direction) {
            Some(path) => Ok(Self::read_entries(path, direction).await?),
            None => Ok(Vec::new()),
        }
    }
}
