//! # F1 Stats Report Model
//!
//! This crate turns aggregation rows into a presentation-agnostic report: named
//! tables of typed cells and named bar-chart specifications.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of HTML or SVG. It depends only on
//!   `core-types`, so every report can be built and checked in a unit test.
//! - **Aligned Charts:** A chart's category labels and each of its series always
//!   have the same length and order. Violations are errors, never truncation.
//!
//! ## Public API
//!
//! - `build_season_report` / `build_global_stats_report`: the two report builders.
//! - `ReportModel`, `Section`, `Table`, `Cell`, `Chart`, `Series`: the model.
//! - `ReportError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod builder;
pub mod error;
pub mod model;

// Re-export the key components to create a clean, public-facing API.
pub use builder::{build_global_stats_report, build_season_report};
pub use error::ReportError;
pub use model::{Cell, Chart, ChartSize, ReportModel, Section, Series, Table, format_number};
