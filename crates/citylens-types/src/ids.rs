//! Type-safe identifier wrappers around ledger-assigned entity numbers.
//!
//! Plots and houses are numbered by the ledger itself: the number is part
//! of the storage key (`plot_<n>`, `house_<n>`), never stored redundantly
//! in the value. The wrappers exist so a plot number can never be passed
//! where a house number is expected.
//!
//! Zero is reserved: the ledger starts numbering at 1, and several record
//! kinds (match keys in particular) treat a decoded zero as corruption.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_num_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw ledger number.
            pub const fn new(n: u64) -> Self {
                Self(n)
            }

            /// Return the inner number.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Whether this is the reserved zero value.
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_num_id! {
    /// Ledger-assigned number of a plot, taken from its `plot_<n>` key.
    PlotNum
}

define_num_id! {
    /// Ledger-assigned number of a house, taken from its `house_<n>` key.
    HouseNum
}
