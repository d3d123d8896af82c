//! Error types for the `citylens-geo` crate.

/// Errors that can occur during spatial allocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    /// A display filter selected the wrong number of units for its mode.
    #[error("filter selected {actual} units, expected {expected}")]
    UnitCountMismatch {
        /// Units the mode requires.
        expected: usize,
        /// Units the filter actually selected.
        actual: usize,
    },

    /// Overlap resolution could not clear a unit of every road corridor
    /// within its retry bound.
    #[error("could not place unit at ({x}, {y}) clear of roads after {attempts} nudges")]
    OverlapUnresolvable {
        /// Raw ledger x coordinate of the unit.
        x: u64,
        /// Raw ledger y coordinate of the unit.
        y: u64,
        /// Nudges attempted before giving up.
        attempts: usize,
    },

    /// A geometric calculation left the representable range.
    #[error("arithmetic overflow in layout calculation")]
    ArithmeticOverflow,
}
