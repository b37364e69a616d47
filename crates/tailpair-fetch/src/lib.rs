//! tailpair-fetch: schedule retrieval for tailpair
//!
//! Implementations of [`tailpair_core::ScheduleSource`]:
//!
//! - [`Fr24Client`]: live FlightRadar24 airport schedule plugin over HTTP
//! - [`FileSource`]: previously saved provider documents

pub mod error;
pub mod file;
pub mod fr24;

pub use error::FetchError;
pub use file::FileSource;
pub use fr24::{FetchConfig, Fr24Client};

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
