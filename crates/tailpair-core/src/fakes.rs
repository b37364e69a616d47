//! In-memory fake schedule source (testing and replays).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Direction, SourceError, SourceResult};
use crate::source::ScheduleSource;

/// Canned response for one direction.
#[derive(Debug)]
enum Canned {
    Entries(Vec<Value>),
    Fail(String),
}

/// A [`ScheduleSource`] that serves fixed entries per direction and records
/// which directions were requested.
#[derive(Debug, Default)]
pub struct MemorySource {
    canned: HashMap<Direction, Canned>,
    calls: Mutex<Vec<(String, Direction)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, direction: Direction, entries: Vec<Value>) -> Self {
        self.canned.insert(direction, Canned::Entries(entries));
        self
    }

    /// Make `direction` fail with a request error.
    pub fn failing(mut self, direction: Direction, message: &str) -> Self {
        self.canned
            .insert(direction, Canned::Fail(message.to_string()));
        self
    }

    /// `(airport, direction)` pairs requested so far.
    pub fn calls(&self) -> Vec<(String, Direction)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ScheduleSource for MemorySource {
    async fn fetch(&self, airport: &str, direction: Direction) -> SourceResult<Vec<Value>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((airport.to_string(), direction));
        }
        match self.canned.get(&direction) {
            Some(Canned::Entries(entries)) => Ok(entries.clone()),
            Some(Canned::Fail(message)) => Err(SourceError::Request(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}
