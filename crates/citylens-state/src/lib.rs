//! Ledger snapshot ingestion for the CityLens client core.
//!
//! The ledger exposes its state as a flat string-keyed map of JSON values.
//! This crate turns one such [`Snapshot`] into the fully typed
//! [`CityState`] in a single pass: map units, the city record, the
//! symmetric neighbor-match index, the governance vote tally, shortcode
//! listings, and per-address user records.
//!
//! # Modules
//!
//! - [`snapshot`] -- the immutable raw key/value snapshot.
//! - [`ingest`] -- the single-pass, prefix-dispatched ingestion.
//! - [`votes`] -- governance vote tallying.
//! - [`error`] -- error types for ingestion failures.

pub mod error;
pub mod ingest;
mod records;
pub mod snapshot;
pub mod votes;

// Re-export primary types at crate root.
pub use error::StateError;
pub use ingest::{CityState, ingest};
pub use snapshot::Snapshot;
pub use votes::GovernanceTally;
