//! Enumeration types shared across the CityLens workspace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlotNum;

/// Lifecycle status of a plot.
///
/// Pending plots exist on the ledger (payment received, land not yet
/// granted) but are excluded from display and spatial allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    /// Purchase registered, land not yet granted.
    #[default]
    Pending,
    /// Granted land, visible on the map.
    Land,
}

/// Axis a road runs along.
///
/// A road occupies a fixed-thickness corridor along its own axis and
/// extends the full map dimension along the other: a vertical road
/// consumes horizontal map extent, a horizontal road vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum RoadOrientation {
    /// Runs north-south; an "avenue" in address terms.
    Vertical,
    /// Runs east-west; a "street" in address terms.
    Horizontal,
}

/// Pre-filter selecting which units are eligible for spatial allocation.
///
/// Pending plots are excluded under every filter. `Pair` is used by
/// pairwise flows (e.g. claiming a fresh neighbor match) and must select
/// exactly two units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum UnitFilter {
    /// Every non-pending unit.
    All,
    /// Exactly the two named plots.
    Pair(PlotNum, PlotNum),
    /// Units listed for peer-to-peer sale: plots with a sale price,
    /// houses with a shortcode price.
    ForSale,
}
