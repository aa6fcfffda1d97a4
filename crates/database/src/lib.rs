//! # F1 Stats Database Crate
//!
//! This crate is the Data Access Layer over the read-only SQLite results store.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the workspace sees typed records
//!   from `core-types` and never builds a query.
//! - **Read-only:** The store is opened with `mode=ro` and is never migrated or written.
//! - **One session per request:** `DbRepository::session` hands out a `ReadSession`
//!   holding a single pooled connection; dropping it returns the connection.
//!
//! ## Public API
//!
//! - `connect` / `close`: open the pool at startup, release it at shutdown.
//! - `DbRepository`: holds the pool and opens read sessions.
//! - `ReadSession`: the parameterized read queries.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{close, connect};
pub use error::DbError;
pub use repository::{DbRepository, RACE_RESULT, ReadSession};
