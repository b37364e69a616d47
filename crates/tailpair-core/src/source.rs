//! The seam between the cycle orchestrator and the flight-data provider.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Direction, SourceResult};

/// Something that can return the raw schedule entries of one direction.
///
/// Implementations return the provider's flight objects untouched; decoding
/// happens in [`extract`](crate::extract).
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the raw flight objects for `direction` at `airport`.
    async fn fetch(&self, airport: &str, direction: Direction) -> SourceResult<Vec<Value>>;
}

/// Dig `result.response.airport.pluginData.schedule.<mode>.data` out of a
/// provider document. A missing path yields an empty list.
pub fn schedule_entries(document: &Value, direction: Direction) -> Vec<Value> {
    let pointer = format!(
        "/result/response/airport/pluginData/schedule/{}/data",
        direction.mode()
    );
    match document.pointer(&pointer) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
