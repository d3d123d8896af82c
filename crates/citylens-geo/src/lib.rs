//! Spatial allocation and street addressing for the CityLens map.
//!
//! Units arrive with raw ledger coordinates; this crate scales them to
//! pixels, sizes each unit's square footprint by its share of city land,
//! nudges footprints clear of road corridors (with a bounded retry), and
//! synthesizes human-readable addresses from the nearest roads.
//!
//! # Modules
//!
//! - [`address`] -- nearest-road lookup and address-string synthesis.
//! - [`allocate`] -- display filtering, footprint sizing, and
//!   corridor-overlap resolution.
//! - [`roads`] -- the default civic road grid.
//! - [`error`] -- error types for layout operations.

pub mod address;
pub mod allocate;
pub mod error;
pub mod roads;

// Re-export primary types at crate root.
pub use address::{
    DEFAULT_NEAREST_COUNT, NearbyRoad, address_coordinate, address_from_nearest_road,
    nearest_roads,
};
pub use allocate::{
    BASE_MAP_SIZE, Layout, MAP_SCALE, MapExtent, PlacedUnit, ROAD_THICKNESS, allocate,
    corridor_overlaps, filter_units, map_extent,
};
pub use error::GeoError;
pub use roads::default_roads;
