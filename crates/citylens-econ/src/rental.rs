//! Rental amortization: what extending a plot's rented land should cost.
//!
//! The fee is not a flat rate. Renting land dilutes every future buyer's
//! matching income, so the fee charges the renter for one year of the
//! income their extra land is projected to capture:
//!
//! 1. Extrapolate next year's purchase count from the city's lifetime
//!    purchase history.
//! 2. Compute the renter's income per purchase at the new land share.
//! 3. Charge `rental_surcharge_factor` times that annual income, with any
//!    still-active prior rental prorated as credit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use citylens_types::{AaParams, City, Plot};

use crate::error::EconError;

/// Seconds in the rental amortization year.
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Minimum ledger payment; fees below this are rounded up to it.
pub const MIN_TRANSFER: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Payment margin over the quoted fee (1%), covering price drift between
/// quote and payment.
const FEE_MARGIN: Decimal = Decimal::from_parts(101, 0, 0, false, 2);

/// A priced rental extension.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RentalQuote {
    /// Projected number of plot purchases over the next year.
    pub expected_purchases: Decimal,
    /// The renter's projected income over the next year.
    pub annual_income: Decimal,
    /// The amortized rental fee (surcharge applied, rounded up).
    pub fee: Decimal,
    /// Prorated credit from the still-active prior rental.
    pub unused_credit: Decimal,
    /// What the renter must actually pay now.
    pub required_payment: Decimal,
}

/// Price a rental extension for `plot` up to `new_rental_amount`.
///
/// # Errors
///
/// - [`EconError::RentalDecrease`] if the new amount is below the
///   currently rented amount (shrinking a rental is not supported).
/// - [`EconError::CityNotStarted`] if the city has no positive elapsed
///   lifetime to extrapolate from.
/// - [`EconError::ZeroPlotPrice`] / [`EconError::ZeroEffectiveSupply`]
///   when a divisor of the projection is zero.
/// - [`EconError::ArithmeticOverflow`] when the projection leaves the
///   representable decimal range.
pub fn rental_quote(
    plot: &Plot,
    city: &City,
    params: &AaParams,
    new_rental_amount: Decimal,
    now: DateTime<Utc>,
) -> Result<RentalQuote, EconError> {
    let existing = plot.rented_amount.unwrap_or(Decimal::ZERO);
    if new_rental_amount < existing {
        return Err(EconError::RentalDecrease {
            current: existing,
            requested: new_rental_amount,
        });
    }

    let effective_supply = city
        .total_land
        .saturating_add(city.total_rented)
        .saturating_add(new_rental_amount)
        .saturating_sub(existing);
    if effective_supply <= Decimal::ZERO {
        return Err(EconError::ZeroEffectiveSupply);
    }
    if params.plot_price <= Decimal::ZERO {
        return Err(EconError::ZeroPlotPrice);
    }

    let elapsed = now.signed_duration_since(city.started_at).num_seconds();
    if elapsed <= 0 {
        return Err(EconError::CityNotStarted);
    }

    // Annualized purchase rate from the city's lifetime so far. Checked:
    // an extreme purchase history over a tiny plot price leaves the
    // representable range.
    let lifetime_purchases = city
        .total_bought
        .checked_div(params.plot_price)
        .ok_or(EconError::ArithmeticOverflow)?;
    let expected_purchases = Decimal::from(SECONDS_PER_YEAR)
        .checked_div(Decimal::from(elapsed))
        .and_then(|rate| rate.checked_mul(lifetime_purchases))
        .ok_or(EconError::ArithmeticOverflow)?;

    // Income one purchase yields to the renter at the new land share.
    let income_per_purchase = Decimal::from(2)
        .saturating_mul(params.plot_price)
        .saturating_mul(params.matching_probability)
        .saturating_mul(new_rental_amount)
        .checked_div(effective_supply)
        .ok_or(EconError::ArithmeticOverflow)?;

    let annual_income = income_per_purchase.saturating_mul(expected_purchases);
    let fee = params
        .rental_surcharge_factor
        .saturating_mul(annual_income)
        .ceil();

    let unused_credit = prorated_credit(plot, existing, now);

    let outstanding = fee.saturating_mul(FEE_MARGIN).saturating_sub(unused_credit);
    let required_payment = outstanding.max(MIN_TRANSFER);

    Ok(RentalQuote {
        expected_purchases,
        annual_income,
        fee,
        unused_credit,
        required_payment,
    })
}

/// Credit for the unused remainder of a still-active rental.
///
/// `floor(existing_rented_amount * seconds_remaining / seconds_per_year)`;
/// zero once the rental has lapsed or none exists.
#[allow(clippy::arithmetic_side_effects)]
fn prorated_credit(plot: &Plot, existing: Decimal, now: DateTime<Utc>) -> Decimal {
    let Some(expiry) = plot.rental_expiry else {
        return Decimal::ZERO;
    };
    let remaining = expiry.signed_duration_since(now).num_seconds();
    if remaining <= 0 {
        return Decimal::ZERO;
    }
    (existing.saturating_mul(Decimal::from(remaining)) / Decimal::from(SECONDS_PER_YEAR)).floor()
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use crate::testutil::{make_city, make_params, make_plot, start_time};

    use super::*;

    /// A city half a year old that has sold 100 plots' worth of land.
    fn seasoned_city() -> City {
        let mut city = make_city(dec!(10000), dec!(0));
        city.total_bought = dec!(100000);
        city
    }

    fn half_year_later() -> DateTime<Utc> {
        start_time() + TimeDelta::seconds(SECONDS_PER_YEAR / 2)
    }

    #[test]
    fn quote_for_fresh_rental() {
        let plot = make_plot(1, dec!(100));
        let city = seasoned_city();
        let params = make_params();

        let quote = rental_quote(&plot, &city, &params, dec!(500), half_year_later());
        assert!(quote.is_ok());
        if let Ok(quote) = quote {
            // 100 purchases in half a year -> 200 expected next year.
            assert_eq!(quote.expected_purchases, dec!(200));
            // income/purchase = 2*1000*0.05*500 / 10500 = 50000/10500
            // annual = that * 200 ~ 952.38..; fee = ceil(1.5 * annual) = 1429
            assert_eq!(quote.fee, dec!(1429));
            assert_eq!(quote.unused_credit, Decimal::ZERO);
            // payment = fee * 1.01 = 1443.29
            assert_eq!(quote.required_payment, dec!(1443.29));
        }
    }

    #[test]
    fn decreasing_rental_is_rejected() {
        let mut plot = make_plot(1, dec!(100));
        plot.rented_amount = Some(dec!(500));
        let city = seasoned_city();
        let params = make_params();

        let result = rental_quote(&plot, &city, &params, dec!(400), half_year_later());
        assert_eq!(
            result,
            Err(EconError::RentalDecrease {
                current: dec!(500),
                requested: dec!(400),
            }),
        );
    }

    #[test]
    fn equal_rental_amount_is_allowed() {
        let mut plot = make_plot(1, dec!(100));
        plot.rented_amount = Some(dec!(500));
        let city = seasoned_city();
        let params = make_params();

        assert!(rental_quote(&plot, &city, &params, dec!(500), half_year_later()).is_ok());
    }

    #[test]
    fn active_rental_earns_prorated_credit() {
        let now = half_year_later();
        let mut plot = make_plot(1, dec!(100));
        plot.rented_amount = Some(dec!(1000));
        // A quarter year of the prior rental remains.
        plot.rental_expiry = Some(now + TimeDelta::seconds(SECONDS_PER_YEAR / 4));
        let city = seasoned_city();
        let params = make_params();

        let quote = rental_quote(&plot, &city, &params, dec!(1000), now);
        assert!(quote.is_ok());
        if let Ok(quote) = quote {
            // floor(1000 * (year/4) / year) = 250
            assert_eq!(quote.unused_credit, dec!(250));
        }
    }

    #[test]
    fn lapsed_rental_earns_no_credit() {
        let now = half_year_later();
        let mut plot = make_plot(1, dec!(100));
        plot.rented_amount = Some(dec!(1000));
        plot.rental_expiry = Some(now - TimeDelta::seconds(60));
        let city = seasoned_city();
        let params = make_params();

        let quote = rental_quote(&plot, &city, &params, dec!(1000), now);
        assert!(quote.is_ok());
        if let Ok(quote) = quote {
            assert_eq!(quote.unused_credit, Decimal::ZERO);
        }
    }

    #[test]
    fn payment_never_drops_below_minimum() {
        let now = half_year_later();
        let mut plot = make_plot(1, dec!(100));
        plot.rented_amount = Some(dec!(1000));
        plot.rental_expiry = Some(now + TimeDelta::seconds(SECONDS_PER_YEAR));
        // A near-dormant city: only one plot's worth ever bought, so the
        // projected fee is tiny and the prior rental's credit swamps it.
        let mut city = seasoned_city();
        city.total_bought = dec!(1000);
        let params = make_params();

        let quote = rental_quote(&plot, &city, &params, dec!(1000), now);
        assert!(quote.is_ok());
        if let Ok(quote) = quote {
            assert_eq!(quote.required_payment, MIN_TRANSFER);
        }
    }

    #[test]
    fn extreme_purchase_history_errors_instead_of_overflowing() {
        let plot = make_plot(1, dec!(100));
        let mut city = seasoned_city();
        city.total_bought = Decimal::MAX;
        let mut params = make_params();
        params.plot_price = dec!(0.01);

        let result = rental_quote(&plot, &city, &params, dec!(500), half_year_later());
        assert_eq!(result, Err(EconError::ArithmeticOverflow));
    }

    #[test]
    fn unstarted_city_is_rejected() {
        let plot = make_plot(1, dec!(100));
        let city = seasoned_city();
        let params = make_params();

        let result = rental_quote(&plot, &city, &params, dec!(500), start_time());
        assert_eq!(result, Err(EconError::CityNotStarted));
    }
}
