//! Domain models for tailpair.
//!
//! - `LegRecord`: one direction of one flight at the home airport
//! - `RotationRow`: one line of the reconciled schedule
//! - `ExceptionSet`: flight numbers that are never paired

pub mod error;
pub mod exceptions;
pub mod leg;
pub mod rotation;

pub use error::{ExportError, ExtractionError, SourceError, SourceResult};
pub use exceptions::ExceptionSet;
pub use leg::{canonical_flight_number, Direction, LegRecord};
pub use rotation::{LegSide, RotationRow};
