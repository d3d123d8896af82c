//! The default road network of the city.
//!
//! Roads are not ledger state: they are fixed civic infrastructure the
//! presentation layer renders and the address resolver names against.
//! The set here mirrors the city's canonical four-road grid; embedders
//! with a custom map pass their own `Vec<Road>` instead.

use citylens_types::{Road, RoadOrientation};

/// The canonical road grid: two streets and two avenues.
pub fn default_roads() -> Vec<Road> {
    vec![
        Road {
            name: "Equator Street".to_owned(),
            orientation: RoadOrientation::Horizontal,
            x: 0,
            y: 2000,
        },
        Road {
            name: "Harbor Street".to_owned(),
            orientation: RoadOrientation::Horizontal,
            x: 0,
            y: 7000,
        },
        Road {
            name: "Meridian Avenue".to_owned(),
            orientation: RoadOrientation::Vertical,
            x: 2000,
            y: 0,
        },
        Road {
            name: "Summit Avenue".to_owned(),
            orientation: RoadOrientation::Vertical,
            x: 8000,
            y: 0,
        },
    ]
}
