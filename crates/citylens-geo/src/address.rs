//! Street addressing: nearest-road lookup and address synthesis.
//!
//! An address is always relative to a road. For a street (horizontal
//! road) the along-coordinate is the point's `x` and the offset is its
//! signed distance north (`N`) or south (`S`) of the road line; for an
//! avenue (vertical road) the axes swap and the letters become `E`/`W`.
//!
//! Format: `"<name>, <along zero-padded to 6 digits>/<letter><offset>"`,
//! e.g. `"Meridian Avenue, 000340/E120"`.

use rust_decimal::{Decimal, MathematicalOps};

use citylens_types::{Road, RoadOrientation};

/// How many nearby roads an address lookup considers by default.
pub const DEFAULT_NEAREST_COUNT: usize = 4;

/// A road together with its position relative to a query point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyRoad<'a> {
    /// The road itself.
    pub road: &'a Road,
    /// Euclidean distance from the query point to the road's anchor.
    pub distance: Decimal,
    /// The point's coordinate along the road's axis.
    pub along: u64,
    /// Signed perpendicular offset from the road line.
    pub offset: Decimal,
}

/// The `count` roads nearest to `(x, y)`, ascending by anchor distance.
///
/// Returns fewer entries when fewer roads exist; never more than `count`.
pub fn nearest_roads(roads: &[Road], x: u64, y: u64, count: usize) -> Vec<NearbyRoad<'_>> {
    let mut nearby: Vec<NearbyRoad<'_>> = roads
        .iter()
        .map(|road| {
            let dx = Decimal::from(x).saturating_sub(Decimal::from(road.x));
            let dy = Decimal::from(y).saturating_sub(Decimal::from(road.y));
            let squared = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
            // Non-negative input, so sqrt cannot fail.
            let distance = squared.sqrt().unwrap_or_default();

            let (along, offset) = match road.orientation {
                RoadOrientation::Horizontal => (x, dy),
                RoadOrientation::Vertical => (y, dx),
            };
            NearbyRoad {
                road,
                distance,
                along,
                offset,
            }
        })
        .collect();

    nearby.sort_by(|a, b| a.distance.cmp(&b.distance));
    nearby.truncate(count);
    nearby
}

/// Format one address relative to a road.
pub fn address_coordinate(nearby: &NearbyRoad<'_>) -> String {
    let letter = match (nearby.road.orientation, nearby.offset >= Decimal::ZERO) {
        (RoadOrientation::Horizontal, true) => 'N',
        (RoadOrientation::Horizontal, false) => 'S',
        (RoadOrientation::Vertical, true) => 'E',
        (RoadOrientation::Vertical, false) => 'W',
    };
    // Midpoints round toward positive infinity: floor(offset + 0.5).
    let offset = nearby
        .offset
        .saturating_add(Decimal::new(5, 1))
        .floor()
        .abs()
        .normalize();
    format!("{}, {:06}/{letter}{offset}", nearby.road.name, nearby.along)
}

/// Every address of a point, one per nearby road, closest first.
pub fn address_from_nearest_road(roads: &[Road], x: u64, y: u64) -> Vec<String> {
    nearest_roads(roads, x, y, DEFAULT_NEAREST_COUNT)
        .iter()
        .map(address_coordinate)
        .collect()
}

#[cfg(test)]
mod tests {
    use citylens_types::RoadOrientation;
    use rust_decimal_macros::dec;

    use super::*;

    fn road(name: &str, orientation: RoadOrientation, x: u64, y: u64) -> Road {
        Road {
            name: name.to_owned(),
            orientation,
            x,
            y,
        }
    }

    fn grid() -> Vec<Road> {
        vec![
            road("Equator Street", RoadOrientation::Horizontal, 0, 2000),
            road("Harbor Street", RoadOrientation::Horizontal, 0, 7000),
            road("Meridian Avenue", RoadOrientation::Vertical, 2000, 0),
            road("Summit Avenue", RoadOrientation::Vertical, 8000, 0),
        ]
    }

    #[test]
    fn distances_are_non_decreasing() {
        let roads = grid();
        let nearby = nearest_roads(&roads, 2500, 2100, 4);
        for pair in nearby.windows(2) {
            if let [closer, farther] = pair {
                assert!(closer.distance <= farther.distance);
            }
        }
    }

    #[test]
    fn never_more_than_count() {
        let roads = grid();
        assert_eq!(nearest_roads(&roads, 0, 0, 2).len(), 2);
        // Fewer roads than requested: return what exists.
        assert_eq!(nearest_roads(&roads, 0, 0, 10).len(), 4);
    }

    #[test]
    fn street_address_uses_x_and_north_south() {
        let street = road("Equator Street", RoadOrientation::Horizontal, 0, 2000);
        let roads = vec![street];

        let north = nearest_roads(&roads, 123, 2045, 1);
        assert_eq!(
            north.first().map(address_coordinate),
            Some("Equator Street, 000123/N45".to_owned()),
        );

        let south = nearest_roads(&roads, 123, 1955, 1);
        assert_eq!(
            south.first().map(address_coordinate),
            Some("Equator Street, 000123/S45".to_owned()),
        );
    }

    #[test]
    fn avenue_address_uses_y_and_east_west() {
        let avenue = road("Meridian Avenue", RoadOrientation::Vertical, 2000, 0);
        let roads = vec![avenue];

        let east = nearest_roads(&roads, 2120, 340, 1);
        assert_eq!(
            east.first().map(address_coordinate),
            Some("Meridian Avenue, 000340/E120".to_owned()),
        );

        let west = nearest_roads(&roads, 1880, 340, 1);
        assert_eq!(
            west.first().map(address_coordinate),
            Some("Meridian Avenue, 000340/W120".to_owned()),
        );
    }

    #[test]
    fn zero_offset_is_north_or_east() {
        let roads = vec![road("Equator Street", RoadOrientation::Horizontal, 0, 2000)];
        let nearby = nearest_roads(&roads, 5, 2000, 1);
        assert_eq!(
            nearby.first().map(address_coordinate),
            Some("Equator Street, 000005/N0".to_owned()),
        );
    }

    #[test]
    fn closest_road_comes_first() {
        let roads = grid();
        let addresses = address_from_nearest_road(&roads, 2100, 2050);
        // Meridian's anchor (2000, 0) is ~2052 away, Equator's (0, 2000)
        // is ~2101, so Meridian's address leads.
        assert_eq!(addresses.len(), 4);
        assert!(
            addresses
                .first()
                .is_some_and(|a| a.starts_with("Meridian Avenue"))
        );
    }

    #[test]
    fn midpoint_offsets_round_toward_positive() {
        let street = road("Equator Street", RoadOrientation::Horizontal, 0, 2000);
        let north_half = NearbyRoad {
            road: &street,
            distance: dec!(44.5),
            along: 1,
            offset: dec!(44.5),
        };
        assert_eq!(
            address_coordinate(&north_half),
            "Equator Street, 000001/N45",
        );

        // -44.5 rounds up to -44, not away to -45.
        let south_half = NearbyRoad {
            road: &street,
            distance: dec!(44.5),
            along: 1,
            offset: dec!(-44.5),
        };
        assert_eq!(
            address_coordinate(&south_half),
            "Equator Street, 000001/S44",
        );

        let south_past_half = NearbyRoad {
            road: &street,
            distance: dec!(44.6),
            along: 1,
            offset: dec!(-44.6),
        };
        assert_eq!(
            address_coordinate(&south_past_half),
            "Equator Street, 000001/S45",
        );
    }
}
