//! Tally Core - Domain entities, services, and traits.
//!
//! This crate holds the expense ledger, the weekly aggregation and the report
//! renderers. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod expenses;
pub mod reports;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
