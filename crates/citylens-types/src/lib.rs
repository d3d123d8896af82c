//! Shared type definitions for the CityLens client core.
//!
//! This crate is the single source of truth for all types used across the
//! CityLens workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for ledger-assigned entity numbers
//! - [`enums`] -- Enumeration types (plot status, road orientation, filters)
//! - [`structs`] -- Core entity structs (plots, houses, city, parameters)
//! - [`info`] -- The string-or-structured `info` attachment

pub mod enums;
pub mod ids;
pub mod info;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{PlotStatus, RoadOrientation, UnitFilter};
pub use ids::{HouseNum, PlotNum};
pub use info::{InfoValue, UnitInfo};
pub use structs::{AaParams, City, House, MapUnit, NeighborMatch, Plot, Road, VoteWeight};
