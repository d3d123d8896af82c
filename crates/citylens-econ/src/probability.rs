//! Matching-probability calculations.
//!
//! Two deliberately different aggregate formulas coexist:
//!
//! - [`overall_probability`] treats each unit as an independent chance of
//!   producing the next match and takes the union of those events
//!   (`1 - product(1 - p)`).
//! - [`user_probability`] is a plain linear share: the user's total land
//!   over the city's, times the matching probability.
//!
//! The two are shown in different UI contexts and must not be unified.

use rust_decimal::Decimal;

use citylens_types::{City, MapUnit, Plot};

use crate::sizing::{city_size, plot_size, unit_size};

/// Per-unit probability of being the next match target.
///
/// `base = unit_size / city_size`, plus the referral boost if the unit is
/// a referred plot, times the matching probability. The result is a
/// modeling approximation and is not clamped to `[0, 1]` by construction.
///
/// An empty city (size zero) yields zero rather than dividing by zero.
#[allow(clippy::arithmetic_side_effects)]
pub fn unit_probability(
    unit: &MapUnit,
    city: &City,
    matching_probability: Decimal,
    referral_boost: Decimal,
) -> Decimal {
    let total = city_size(city);
    if total.is_zero() {
        return Decimal::ZERO;
    }

    let mut base = unit_size(unit) / total;
    if let MapUnit::Plot(plot) = unit
        && plot.is_referred()
    {
        base = base.saturating_add(referral_boost);
    }
    base.saturating_mul(matching_probability)
}

/// Probability that *any* of the given units is the next match target.
///
/// Union of independent per-unit events: `1 - product(1 - p_u)`. Valid in
/// `[0, 1]` whenever every per-unit probability is at most 1. An empty
/// unit list yields zero.
pub fn overall_probability(
    units: &[MapUnit],
    city: &City,
    matching_probability: Decimal,
    referral_boost: Decimal,
) -> Decimal {
    let mut none_matched = Decimal::ONE;
    for unit in units {
        let p = unit_probability(unit, city, matching_probability, referral_boost);
        none_matched = none_matched.saturating_mul(Decimal::ONE.saturating_sub(p));
    }
    Decimal::ONE.saturating_sub(none_matched)
}

/// Linear approximation of one user's chance over their whole holding.
///
/// `sum(plot sizes) / city_size * matching_probability`. Referral boosts
/// are deliberately not applied here; this is the proportional-share view,
/// not the union-of-events view of [`overall_probability`].
#[allow(clippy::arithmetic_side_effects)]
pub fn user_probability(
    user_plots: &[Plot],
    city: &City,
    matching_probability: Decimal,
) -> Decimal {
    let total = city_size(city);
    if total.is_zero() {
        return Decimal::ZERO;
    }

    let holding = user_plots
        .iter()
        .fold(Decimal::ZERO, |acc, plot| acc.saturating_add(plot_size(plot)));
    holding / total * matching_probability
}
