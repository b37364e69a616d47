//! FlightRadar24 airport schedule client
//!
//! Issues one GET per direction against the public `airport.json` endpoint
//! with the `schedule` plugin and hands back the raw flight objects.

use crate::error::FetchError;
use crate::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tailpair_core::{schedule_entries, Direction, ScheduleSource, SourceResult};
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://api.flightradar24.com";
const SITE: &str = "https://www.flightradar24.com";
const SITE_REFERER: &str = "https://www.flightradar24.com/";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Provider client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// API base URL
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Entries requested per direction
    pub page_limit: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: std::env::var("TAILPAIR_PROVIDER_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_ms: 15_000,
            page_limit: 100,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific provider URL
    pub fn new(base_url: &str) -> Self {
        FetchConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// HTTP client for the FlightRadar24 schedule plugin
pub struct Fr24Client {
    config: FetchConfig,
    http_client: reqwest::Client,
}

impl Fr24Client {
    /// Create a new client
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));
        headers.insert(ORIGIN, HeaderValue::from_static(SITE));

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Fr24Client {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/common/v1/airport.json", self.config.base_url)
    }

    /// Build the schedule request for one direction without sending it
    pub fn schedule_request(&self, airport: &str, direction: Direction) -> Result<reqwest::Request> {
        let limit = self.config.page_limit.to_string();
        let request = self
            .http_client
            .get(self.endpoint())
            .query(&[
                ("code", airport),
                ("plugin[]", "schedule"),
                ("plugin-setting[schedule][mode]", direction.mode()),
                ("page", "1"),
                ("limit", limit.as_str()),
            ])
            .build()?;
        Ok(request)
    }

    /// Fetch the full provider document for one direction
    pub async fn fetch_document(&self, airport: &str, direction: Direction) -> Result<Value> {
        let request = self.schedule_request(airport, direction)?;
        debug!(url = %request.url(), "requesting schedule");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let document: Value = serde_json::from_slice(&body)?;
        Ok(document)
    }
}

#[async_trait]
impl ScheduleSource for Fr24Client {
    async fn fetch(&self, airport: &str, direction: Direction) -> SourceResult<Vec<Value>> {
        let document = self.fetch_document(airport, direction).await?;
        let entries = schedule_entries(&document, direction);
        info!(
            event = "fetch.completed",
            direction = %direction,
            airport = %airport,
            entries = entries.len(),
        );
        Ok(entries)
    }
}
