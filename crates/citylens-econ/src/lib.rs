//! Decimal-precision economic model for the CityLens ledger city.
//!
//! Every quantity here feeds ledger-precision amounts, so all arithmetic
//! uses [`rust_decimal::Decimal`] -- no floating point anywhere.
//!
//! # Modules
//!
//! - [`sizing`] -- effective sizes of cities, plots, and houses.
//! - [`probability`] -- per-unit and aggregate matching probabilities,
//!   including the two deliberately divergent aggregate formulas.
//! - [`pricing`] -- plot price with the matching fee, parameter
//!   validation, and flat sale fees.
//! - [`rental`] -- rental-fee amortization against projected purchase
//!   income.
//! - [`error`] -- error types for economic calculations.

pub mod error;
pub mod pricing;
pub mod probability;
pub mod rental;
pub mod sizing;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export primary operations at crate root.
pub use error::EconError;
pub use pricing::{
    MAX_MATCHING_PROBABILITY, followup_reward, p2p_sale_fee, plot_price, shortcode_sale_fee,
    validate_params,
};
pub use probability::{overall_probability, unit_probability, user_probability};
pub use rental::{MIN_TRANSFER, RentalQuote, SECONDS_PER_YEAR, rental_quote};
pub use sizing::{city_size, plot_size, unit_size};
