//! Size helpers: how much land a city, plot, or house counts for.
//!
//! A plot's effective size includes any land its owner currently rents;
//! houses have no rental extension. City size is granted plus rented land.

use rust_decimal::Decimal;

use citylens_types::{City, MapUnit, Plot};

/// Total effective size of the city: granted land plus rented land.
pub fn city_size(city: &City) -> Decimal {
    city.total_land.saturating_add(city.total_rented)
}

/// Effective size of a plot: base amount plus any rented extension.
pub fn plot_size(plot: &Plot) -> Decimal {
    plot.amount
        .saturating_add(plot.rented_amount.unwrap_or(Decimal::ZERO))
}

/// Effective size of any map unit.
pub fn unit_size(unit: &MapUnit) -> Decimal {
    match unit {
        MapUnit::Plot(plot) => plot_size(plot),
        MapUnit::House(house) => house.amount,
    }
}
