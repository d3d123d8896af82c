//! Error types for the `citylens-state` crate.
//!
//! Ingestion is fail-fast: a snapshot entry under a recognized prefix that
//! does not match its expected shape aborts the whole pass, because a
//! corrupted entity must never be displayed or priced. Unknown prefixes,
//! by contrast, are skipped silently for forward compatibility.

use rust_decimal::Decimal;

/// Errors that can occur while ingesting a ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// A recognized key carries a value of the wrong shape.
    #[error("malformed value under {key}: {reason}")]
    MalformedValue {
        /// The offending snapshot key.
        key: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A recognized prefix is followed by a suffix that does not decode
    /// (e.g. a non-numeric plot number).
    #[error("malformed snapshot key: {key}")]
    BadKey {
        /// The offending snapshot key.
        key: String,
    },

    /// A timestamp field is outside the representable range.
    #[error("timestamp {seconds} under {key} is out of range")]
    BadTimestamp {
        /// The offending snapshot key.
        key: String,
        /// The raw unix seconds.
        seconds: i64,
    },

    /// A match key does not name two distinct non-zero plots.
    #[error("match key {key} must name two non-zero plots")]
    BadMatchKey {
        /// The offending snapshot key.
        key: String,
    },

    /// A vote entry is not a record of weighted values.
    #[error("vote entry under {key} is not a record")]
    BadVoteValue {
        /// The offending snapshot key.
        key: String,
    },

    /// A magnitude that must be non-negative carries a negative value.
    #[error("negative amount {amount} under {key}")]
    NegativeAmount {
        /// The offending snapshot key.
        key: String,
        /// The rejected amount.
        amount: Decimal,
    },
}
