//! Plot pricing, parameter validation, and flat sale fees.
//!
//! The plot price folds the expected cost of matching into the base price:
//! a buyer pays for their own plot plus the amortized chance that the
//! purchase triggers a match (which grants two houses and a referral
//! payout). The fee denominator `1 - 4 * matching_probability` goes
//! non-positive at `matching_probability >= 0.25`, which is why that bound
//! is a hard parameter invariant.

use rust_decimal::Decimal;

use citylens_types::AaParams;

use crate::error::EconError;

/// Upper bound (exclusive) for the matching probability.
pub const MAX_MATCHING_PROBABILITY: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Validate the numeric invariants of a parameter set.
///
/// Every numeric parameter must be non-negative and the matching
/// probability must be strictly below 0.25.
///
/// # Errors
///
/// Returns [`EconError::NegativeParameter`] or
/// [`EconError::MatchingProbabilityTooHigh`].
pub fn validate_params(params: &AaParams) -> Result<(), EconError> {
    let non_negative = [
        ("matching_probability", params.matching_probability),
        ("plot_price", params.plot_price),
        ("referral_boost", params.referral_boost),
        ("rental_surcharge_factor", params.rental_surcharge_factor),
        ("p2p_sale_fee", params.p2p_sale_fee),
        ("shortcode_sale_fee", params.shortcode_sale_fee),
        ("followup_reward_share", params.followup_reward_share),
    ];
    for (name, value) in non_negative {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(EconError::NegativeParameter { name, value });
        }
    }

    if params.matching_probability >= MAX_MATCHING_PROBABILITY {
        return Err(EconError::MatchingProbabilityTooHigh {
            value: params.matching_probability,
        });
    }

    Ok(())
}

/// Total price of a new plot, matching fee included.
///
/// `fee = 2 * (1 + referral_boost) * mp / (1 - 4 * mp)`;
/// `total = ceil(plot_price * (1 + fee))`.
///
/// # Errors
///
/// Returns [`EconError::MatchingProbabilityTooHigh`] when the fee
/// denominator would be non-positive, and the validation errors of
/// [`validate_params`] for out-of-range parameters.
#[allow(clippy::arithmetic_side_effects)]
pub fn plot_price(params: &AaParams) -> Result<Decimal, EconError> {
    validate_params(params)?;

    let mp = params.matching_probability;
    let denominator = Decimal::ONE.saturating_sub(Decimal::from(4).saturating_mul(mp));
    // validate_params already bounds mp < 0.25, so the denominator is
    // positive here; the check stays as the formula's own precondition.
    if denominator <= Decimal::ZERO {
        return Err(EconError::MatchingProbabilityTooHigh { value: mp });
    }

    let fee = Decimal::from(2)
        .saturating_mul(Decimal::ONE.saturating_add(params.referral_boost))
        .saturating_mul(mp)
        / denominator;
    Ok(params
        .plot_price
        .saturating_mul(Decimal::ONE.saturating_add(fee))
        .ceil())
}

/// Fee withheld by the city on a peer-to-peer plot sale.
pub fn p2p_sale_fee(price: Decimal, params: &AaParams) -> Decimal {
    price.saturating_mul(params.p2p_sale_fee).ceil()
}

/// Fee withheld by the city on a shortcode sale.
pub fn shortcode_sale_fee(price: Decimal, params: &AaParams) -> Decimal {
    price.saturating_mul(params.shortcode_sale_fee).ceil()
}

/// Reward paid to a plot owner for completing an attestation follow-up.
pub fn followup_reward(params: &AaParams) -> Decimal {
    params
        .plot_price
        .saturating_mul(params.followup_reward_share)
        .floor()
}
