//! Error types for the `citylens-econ` crate.
//!
//! All fallible operations in this crate return [`EconError`] through the
//! standard [`Result`] type alias.

use rust_decimal::Decimal;

/// Errors that can occur during economic calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconError {
    /// The matching probability makes the plot-price fee denominator
    /// non-positive.
    #[error("matching probability {value} must be below 0.25")]
    MatchingProbabilityTooHigh {
        /// The rejected probability.
        value: Decimal,
    },

    /// A parameter that must be non-negative carries a negative value.
    #[error("parameter {name} must be non-negative, got {value}")]
    NegativeParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A rental change would shrink the currently rented amount.
    #[error("rented amount cannot decrease from {current} to {requested}")]
    RentalDecrease {
        /// Currently rented amount.
        current: Decimal,
        /// Requested new amount.
        requested: Decimal,
    },

    /// The city has no elapsed lifetime, so the purchase rate cannot be
    /// extrapolated.
    #[error("city lifetime is not positive; cannot extrapolate purchase rate")]
    CityNotStarted,

    /// The effective land supply is zero, so per-purchase income is
    /// undefined.
    #[error("effective land supply is zero")]
    ZeroEffectiveSupply,

    /// The governed plot price is zero, so the purchase count cannot be
    /// derived from the amount bought.
    #[error("plot price is zero")]
    ZeroPlotPrice,

    /// An intermediate quantity left the representable decimal range.
    #[error("arithmetic overflow in economic calculation")]
    ArithmeticOverflow,
}
