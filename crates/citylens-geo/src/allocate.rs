//! Spatial allocation: placing units on the pixel grid, clear of roads.
//!
//! Every eligible unit gets a square footprint centered on its scaled
//! ledger coordinate. Footprint area is proportional to the unit's share
//! of total city land, capped so no single unit dominates the map. When a
//! footprint lands on a road corridor it is nudged perpendicular to the
//! road until clear of *all* corridors; clearing one road can push a unit
//! onto another, so every nudge restarts the scan. The nudge count is
//! bounded — a grid whose corridors jointly cover an axis would otherwise
//! loop forever.

use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;
use ts_rs::TS;

use citylens_econ::unit_size;
use citylens_types::{MapUnit, Road, RoadOrientation, UnitFilter};

use crate::address::address_from_nearest_road;
use crate::error::GeoError;

/// Extent of the raw ledger coordinate space per axis.
pub const BASE_MAP_SIZE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Global scale from raw ledger coordinates to pixels.
pub const MAP_SCALE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Corridor thickness of every road, in pixels.
pub const ROAD_THICKNESS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Cap on any single unit's share of the visual map area.
const AREA_SHARE_CAP: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Overall pixel extent of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MapExtent {
    /// Width in pixels.
    #[ts(as = "String")]
    pub width: Decimal,
    /// Height in pixels.
    #[ts(as = "String")]
    pub height: Decimal,
}

/// A unit with resolved map geometry and pre-computed addresses.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlacedUnit {
    /// The unit itself.
    pub unit: MapUnit,
    /// Center x in pixels, after overlap resolution.
    #[ts(as = "String")]
    pub px: Decimal,
    /// Center y in pixels, after overlap resolution.
    #[ts(as = "String")]
    pub py: Decimal,
    /// Side length of the square footprint, in pixels.
    #[ts(as = "String")]
    pub side: Decimal,
    /// Addresses relative to the nearest roads, closest first.
    pub addresses: Vec<String>,
}

/// A fully laid-out map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Overall pixel extent.
    pub extent: MapExtent,
    /// Placed units, in input order.
    pub placed: Vec<PlacedUnit>,
}

/// Pixel extent of the map: the scaled base size plus, per axis, the
/// corridors of the roads that consume that axis (vertical roads widen
/// the map, horizontal roads heighten it).
pub fn map_extent(roads: &[Road]) -> MapExtent {
    let base = BASE_MAP_SIZE.saturating_mul(MAP_SCALE);
    let mut width = base;
    let mut height = base;
    for road in roads {
        match road.orientation {
            RoadOrientation::Vertical => width = width.saturating_add(ROAD_THICKNESS),
            RoadOrientation::Horizontal => height = height.saturating_add(ROAD_THICKNESS),
        }
    }
    MapExtent { width, height }
}

/// Select the units a display mode shows.
///
/// Pending plots are excluded under every filter.
///
/// # Errors
///
/// Returns [`GeoError::UnitCountMismatch`] when a pairwise filter does
/// not select exactly two units.
pub fn filter_units(units: &[MapUnit], filter: UnitFilter) -> Result<Vec<MapUnit>, GeoError> {
    let eligible = units.iter().filter(|unit| !unit.is_pending());
    let selected: Vec<MapUnit> = match filter {
        UnitFilter::All => eligible.cloned().collect(),
        UnitFilter::Pair(a, b) => eligible
            .filter(|unit| {
                unit.as_plot()
                    .is_some_and(|plot| plot.plot_num == a || plot.plot_num == b)
            })
            .cloned()
            .collect(),
        UnitFilter::ForSale => eligible
            .filter(|unit| match unit {
                MapUnit::Plot(plot) => plot.sale_price.is_some(),
                MapUnit::House(house) => house.shortcode_price.is_some(),
            })
            .cloned()
            .collect(),
    };

    if matches!(filter, UnitFilter::Pair(_, _)) && selected.len() != 2 {
        return Err(GeoError::UnitCountMismatch {
            expected: 2,
            actual: selected.len(),
        });
    }
    Ok(selected)
}

/// Lay out the filtered units on the pixel grid.
///
/// # Errors
///
/// Returns [`GeoError::UnitCountMismatch`] from the display filter, or
/// [`GeoError::OverlapUnresolvable`] when a unit cannot be nudged clear
/// of every road corridor within the retry bound.
#[allow(clippy::arithmetic_side_effects)]
pub fn allocate(
    units: &[MapUnit],
    roads: &[Road],
    filter: UnitFilter,
) -> Result<Layout, GeoError> {
    let selected = filter_units(units, filter)?;
    let extent = map_extent(roads);

    // Total effective size drives each unit's share of the visual area.
    // An all-zero city still needs finite footprints.
    let mut total_size = selected
        .iter()
        .fold(Decimal::ZERO, |acc, unit| acc.saturating_add(unit_size(unit)));
    if total_size.is_zero() {
        total_size = Decimal::ONE;
    }

    let mut placed = Vec::with_capacity(selected.len());
    for unit in selected {
        let fraction = unit_size(&unit) / total_size * AREA_SHARE_CAP;
        let area = fraction
            .saturating_mul(extent.width)
            .saturating_mul(extent.height);
        let side = area.sqrt().ok_or(GeoError::ArithmeticOverflow)?;

        let px = Decimal::from(unit.x()).saturating_mul(MAP_SCALE);
        let py = Decimal::from(unit.y()).saturating_mul(MAP_SCALE);
        let (px, py) = resolve_overlaps(&unit, px, py, side, roads)?;

        let addresses = address_from_nearest_road(roads, unit.x(), unit.y());
        placed.push(PlacedUnit {
            unit,
            px,
            py,
            side,
            addresses,
        });
    }

    Ok(Layout { extent, placed })
}

/// Whether a footprint centered at `center` with the given side overlaps
/// the road's corridor along the road's own axis. Touching edges do not
/// count as overlap.
#[allow(clippy::arithmetic_side_effects)]
pub fn corridor_overlaps(road: &Road, px: Decimal, py: Decimal, side: Decimal) -> bool {
    let (line, center) = match road.orientation {
        RoadOrientation::Vertical => (Decimal::from(road.x).saturating_mul(MAP_SCALE), px),
        RoadOrientation::Horizontal => (Decimal::from(road.y).saturating_mul(MAP_SCALE), py),
    };
    let half_corridor = ROAD_THICKNESS / Decimal::from(2);
    let half_side = side / Decimal::from(2);

    center.saturating_sub(half_side) < line.saturating_add(half_corridor)
        && line.saturating_sub(half_corridor) < center.saturating_add(half_side)
}

/// Nudge a unit's center perpendicular to road corridors until it is
/// clear of all of them.
///
/// Each nudge moves the center just past the offending corridor's far
/// edge, on whichever side of the road line the center already sits.
#[allow(clippy::arithmetic_side_effects)]
fn resolve_overlaps(
    unit: &MapUnit,
    mut px: Decimal,
    mut py: Decimal,
    side: Decimal,
    roads: &[Road],
) -> Result<(Decimal, Decimal), GeoError> {
    let max_attempts = roads.len().saturating_mul(4).saturating_add(8);
    let half_corridor = ROAD_THICKNESS / Decimal::from(2);
    let half_side = side / Decimal::from(2);

    let mut attempts = 0;
    loop {
        let Some(road) = roads
            .iter()
            .find(|road| corridor_overlaps(road, px, py, side))
        else {
            return Ok((px, py));
        };

        if attempts >= max_attempts {
            return Err(GeoError::OverlapUnresolvable {
                x: unit.x(),
                y: unit.y(),
                attempts,
            });
        }
        attempts = attempts.saturating_add(1);

        match road.orientation {
            RoadOrientation::Vertical => {
                let line = Decimal::from(road.x).saturating_mul(MAP_SCALE);
                px = shifted_center(px, line, half_corridor, half_side);
            }
            RoadOrientation::Horizontal => {
                let line = Decimal::from(road.y).saturating_mul(MAP_SCALE);
                py = shifted_center(py, line, half_corridor, half_side);
            }
        }
    }
}

/// The nearest center position clear of a corridor, keeping the unit on
/// the side of the road line it already occupies.
fn shifted_center(
    center: Decimal,
    line: Decimal,
    half_corridor: Decimal,
    half_side: Decimal,
) -> Decimal {
    if center >= line {
        line.saturating_add(half_corridor).saturating_add(half_side)
    } else {
        line.saturating_sub(half_corridor).saturating_sub(half_side)
    }
}
