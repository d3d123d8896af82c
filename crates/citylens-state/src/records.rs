//! Raw serde mirrors of the ledger's stored value shapes.
//!
//! These structs decode the loose JSON records exactly as the ledger
//! stores them (unix-second timestamps, optional fields, `ref` as a field
//! name). The ingest pass converts them into the typed entities of
//! `citylens-types`, pulling identity out of the storage key.

use rust_decimal::Decimal;
use serde::Deserialize;

use citylens_types::PlotStatus;

/// Stored value of a `plot_<n>` key.
#[derive(Debug, Deserialize)]
pub(crate) struct PlotRecord {
    #[serde(default)]
    pub status: PlotStatus,
    pub x: u64,
    pub y: u64,
    pub amount: Decimal,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
    #[serde(default)]
    pub ts: i64,
    #[serde(default)]
    pub rented_amount: Option<Decimal>,
    #[serde(default)]
    pub rental_expiry_ts: Option<i64>,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub ref_plot_num: Option<u64>,
    #[serde(default, rename = "ref")]
    pub referrer: Option<String>,
}

/// Stored value of a `house_<n>` key.
#[derive(Debug, Deserialize)]
pub(crate) struct HouseRecord {
    pub plot_num: u64,
    pub x: u64,
    pub y: u64,
    pub amount: Decimal,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
    #[serde(default)]
    pub ts: i64,
    #[serde(default)]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub shortcode_price: Option<Decimal>,
}

/// Stored value of the `city_<name>` key.
#[derive(Debug, Deserialize)]
pub(crate) struct CityRecord {
    #[serde(default)]
    pub total_land: Decimal,
    #[serde(default)]
    pub total_rented: Decimal,
    #[serde(default)]
    pub total_bought: Decimal,
    #[serde(default)]
    pub count_plots: u64,
    #[serde(default)]
    pub count_houses: u64,
    #[serde(default)]
    pub mayor: Option<String>,
    #[serde(default)]
    pub start_ts: i64,
    #[serde(default)]
    pub matching_probability: Option<Decimal>,
    #[serde(default)]
    pub plot_price: Option<Decimal>,
    #[serde(default)]
    pub referral_boost: Option<Decimal>,
}

/// Stored value of a `match_<p1>_<p2>` key.
#[derive(Debug, Deserialize)]
pub(crate) struct MatchRecord {
    #[serde(default)]
    pub built_ts: i64,
    #[serde(default)]
    pub first: Option<String>,
}

/// One entry inside a `votes_<address>` record.
#[derive(Debug, Deserialize)]
pub(crate) struct VoteEntryRecord {
    pub balance: Decimal,
    pub value: serde_json::Value,
}

/// Stored value of a `shortcode_<code>` key: either a bare house number
/// or a record carrying one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ShortcodeRecord {
    /// Bare house number.
    Bare(u64),
    /// Record form.
    Record {
        /// The aliased house.
        house_num: u64,
    },
}

impl ShortcodeRecord {
    /// The house number the shortcode points at, whichever form it took.
    pub(crate) const fn house_num(&self) -> u64 {
        match self {
            Self::Bare(n) | Self::Record { house_num: n } => *n,
        }
    }
}
