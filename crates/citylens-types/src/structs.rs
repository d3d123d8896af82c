//! Core entity structs reconstructed from the ledger snapshot.
//!
//! Every value here is an immutable snapshot: a new ledger state produces a
//! fresh set of entities that wholesale replaces the previous one. Identity
//! (`plot_num`, `house_num`) comes from the storage key, never from the
//! stored value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{PlotStatus, RoadOrientation};
use crate::ids::{HouseNum, PlotNum};
use crate::info::UnitInfo;

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// A plot of raw land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Ledger number, derived from the `plot_<n>` storage key.
    pub plot_num: PlotNum,
    /// Lifecycle status; pending plots never reach the map.
    pub status: PlotStatus,
    /// Raw ledger x coordinate (non-negative by construction).
    pub x: u64,
    /// Raw ledger y coordinate.
    pub y: u64,
    /// Base size of the plot in land units.
    #[ts(as = "String")]
    pub amount: Decimal,
    /// Owner address; `None` means administrator-owned.
    pub owner: Option<String>,
    /// Free-form metadata.
    pub info: Option<UnitInfo>,
    /// When the plot was created on the ledger.
    pub created_at: DateTime<Utc>,
    /// Additional land currently rented by the owner.
    #[ts(as = "Option<String>")]
    pub rented_amount: Option<Decimal>,
    /// When the current rental lapses.
    pub rental_expiry: Option<DateTime<Utc>>,
    /// Peer-to-peer listing price, if the plot is up for sale.
    #[ts(as = "Option<String>")]
    pub sale_price: Option<Decimal>,
    /// Plot whose owner referred this purchase, if any.
    pub ref_plot_num: Option<PlotNum>,
    /// Referrer address recorded alongside the referral.
    pub referrer: Option<String>,
}

impl Plot {
    /// Whether this plot carries referral attribution.
    ///
    /// Referred plots receive the referral boost when their matching
    /// probability is computed.
    pub const fn is_referred(&self) -> bool {
        self.ref_plot_num.is_some()
    }
}

// ---------------------------------------------------------------------------
// House
// ---------------------------------------------------------------------------

/// A house, built on a plot after a successful neighbor match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct House {
    /// Ledger number, derived from the `house_<n>` storage key.
    pub house_num: HouseNum,
    /// The plot this house sits on.
    pub plot_num: PlotNum,
    /// Raw ledger x coordinate.
    pub x: u64,
    /// Raw ledger y coordinate.
    pub y: u64,
    /// Base size of the house in land units.
    #[ts(as = "String")]
    pub amount: Decimal,
    /// Owner address; `None` means administrator-owned.
    pub owner: Option<String>,
    /// Free-form metadata.
    pub info: Option<UnitInfo>,
    /// When the house was created on the ledger.
    pub created_at: DateTime<Utc>,
    /// Human-memorable alias attached to this house, if any.
    pub shortcode: Option<String>,
    /// Peer-to-peer listing price for the shortcode.
    #[ts(as = "Option<String>")]
    pub shortcode_price: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// MapUnit
// ---------------------------------------------------------------------------

/// A unit on the city map: either a plot or a house.
///
/// This is a closed union — every consumption site matches exhaustively,
/// so a third unit kind becomes a compile-time exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapUnit {
    /// Raw land.
    Plot(Plot),
    /// A built house.
    House(House),
}

impl MapUnit {
    /// Raw ledger x coordinate.
    pub const fn x(&self) -> u64 {
        match self {
            Self::Plot(p) => p.x,
            Self::House(h) => h.x,
        }
    }

    /// Raw ledger y coordinate.
    pub const fn y(&self) -> u64 {
        match self {
            Self::Plot(p) => p.y,
            Self::House(h) => h.y,
        }
    }

    /// Base size in land units, excluding any rented extension.
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Plot(p) => p.amount,
            Self::House(h) => h.amount,
        }
    }

    /// Owner address; `None` means administrator-owned.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Plot(p) => p.owner.as_deref(),
            Self::House(h) => h.owner.as_deref(),
        }
    }

    /// Free-form metadata, if any.
    pub const fn info(&self) -> Option<&UnitInfo> {
        match self {
            Self::Plot(p) => p.info.as_ref(),
            Self::House(h) => h.info.as_ref(),
        }
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Plot(p) => p.created_at,
            Self::House(h) => h.created_at,
        }
    }

    /// Whether this unit is a pending plot (excluded from display).
    pub const fn is_pending(&self) -> bool {
        match self {
            Self::Plot(p) => matches!(p.status, PlotStatus::Pending),
            Self::House(_) => false,
        }
    }

    /// Downcast to a plot.
    pub const fn as_plot(&self) -> Option<&Plot> {
        match self {
            Self::Plot(p) => Some(p),
            Self::House(_) => None,
        }
    }

    /// Downcast to a house.
    pub const fn as_house(&self) -> Option<&House> {
        match self {
            Self::Plot(_) => None,
            Self::House(h) => Some(h),
        }
    }
}

// ---------------------------------------------------------------------------
// Road
// ---------------------------------------------------------------------------

/// A named road on the city map.
///
/// The anchor `(x, y)` is in raw ledger coordinates. Only the coordinate
/// matching the road's own axis is meaningful for corridor placement; the
/// other is where the road's label sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Road {
    /// Display name, used in synthesized addresses.
    pub name: String,
    /// Which axis the road runs along.
    pub orientation: RoadOrientation,
    /// Raw anchor x coordinate.
    pub x: u64,
    /// Raw anchor y coordinate.
    pub y: u64,
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// The aggregate city record maintained by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct City {
    /// City name, derived from the `city_<name>` storage key.
    pub name: String,
    /// Total granted land, in land units.
    #[ts(as = "String")]
    pub total_land: Decimal,
    /// Total currently rented land.
    #[ts(as = "String")]
    pub total_rented: Decimal,
    /// Cumulative amount spent on plot purchases.
    #[ts(as = "String")]
    pub total_bought: Decimal,
    /// Number of plots ever created.
    pub count_plots: u64,
    /// Number of houses ever built.
    pub count_houses: u64,
    /// The mayor's address.
    pub mayor: Option<String>,
    /// When the city started.
    pub started_at: DateTime<Utc>,
    /// Cached copy of the governed matching probability, if present.
    #[ts(as = "Option<String>")]
    pub matching_probability: Option<Decimal>,
    /// Cached copy of the governed plot price, if present.
    #[ts(as = "Option<String>")]
    pub plot_price: Option<Decimal>,
    /// Cached copy of the governed referral boost, if present.
    #[ts(as = "Option<String>")]
    pub referral_boost: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// AaParams
// ---------------------------------------------------------------------------

/// The live economic parameter set of the city's autonomous agent.
///
/// All numeric fields are non-negative; `matching_probability` must stay
/// below 0.25 or the plot-price fee denominator goes non-positive. Both
/// invariants are enforced by `citylens-econ`'s parameter validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AaParams {
    /// Per-purchase chance that a new plot is immediately matched.
    #[ts(as = "String")]
    pub matching_probability: Decimal,
    /// Base price of one plot, before the matching fee.
    #[ts(as = "String")]
    pub plot_price: Decimal,
    /// Additive probability bonus for referred plots.
    #[ts(as = "String")]
    pub referral_boost: Decimal,
    /// Multiplier applied to projected rental income to obtain the fee.
    #[ts(as = "String")]
    pub rental_surcharge_factor: Decimal,
    /// Fee fraction charged on peer-to-peer plot sales.
    #[ts(as = "String")]
    pub p2p_sale_fee: Decimal,
    /// Fee fraction charged on shortcode sales.
    #[ts(as = "String")]
    pub shortcode_sale_fee: Decimal,
    /// Share of the plot price rewarded for attestation follow-ups.
    #[ts(as = "String")]
    pub followup_reward_share: Decimal,
    /// Address of the randomness oracle agent.
    pub randomness_aa: Option<String>,
    /// Addresses of the recognized attestors.
    pub attestors: Vec<String>,
    /// The mayor's address.
    pub mayor: Option<String>,
}

// ---------------------------------------------------------------------------
// NeighborMatch
// ---------------------------------------------------------------------------

/// A confirmed neighbor pairing between two plots.
///
/// Matches are stored once on the ledger (`match_<p1>_<p2>`) but read from
/// either side: the ingest inserts one record per direction, each naming
/// the *other* plot as `neighbor_plot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NeighborMatch {
    /// The plot this record is read from.
    pub plot_num: PlotNum,
    /// The paired plot on the other side.
    pub neighbor_plot: PlotNum,
    /// When the houses were built.
    pub built_at: DateTime<Utc>,
    /// Address that triggered the match, if recorded.
    pub first: Option<String>,
}

// ---------------------------------------------------------------------------
// Governance votes
// ---------------------------------------------------------------------------

/// One address's weighted support for a proposed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VoteWeight {
    /// The voting address.
    pub address: String,
    /// Locked balance backing the vote.
    #[ts(as = "String")]
    pub balance: Decimal,
}
