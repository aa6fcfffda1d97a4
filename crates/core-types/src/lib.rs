//! # F1 Stats Core Types
//!
//! Layer 0 of the workspace: the typed records every query result is decoded
//! into, and the season selector a request carries. No crate here knows about
//! HTTP or rendering.

pub mod error;
pub mod records;
pub mod selector;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use records::{
    ConstructorStandingRow, DriverStandingRow, ManufacturerWins, NationalityCount, RaceRow,
    SeasonConstructorRow, SeasonRow,
};
pub use selector::SeasonSelector;
