//! The snapshot-to-view recompute pipeline.
//!
//! The original client held city state in reactive global stores that
//! recomputed on every ledger update. Here that behavior is an explicit,
//! stateless call: the external ledger subscription hands
//! [`recompute`] a fresh [`Snapshot`] and the previous [`DerivedView`] is
//! discarded wholesale. There is no internal state, no incremental
//! patching, and no partial update — concurrent readers always hold
//! either the old or the new complete view.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use citylens_econ::{EconError, overall_probability, plot_price, validate_params};
use citylens_geo::{GeoError, Layout, allocate};
use citylens_state::{CityState, Snapshot, StateError, ingest};
use citylens_types::{AaParams, City, Road, UnitFilter};

/// Errors surfaced by the recompute pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Snapshot ingestion failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// Spatial allocation failed.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The economic parameter set is invalid.
    #[error(transparent)]
    Econ(#[from] EconError),
}

/// Everything the presentation layer needs from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView {
    /// The typed city state: units, match index, votes, listings, users.
    pub state: CityState,
    /// Placed units and overall map extent.
    pub layout: Layout,
    /// Current all-in plot price under the given parameters.
    pub plot_price: Decimal,
    /// Probability that any currently placed unit is the next match
    /// target; `None` when the snapshot carries no city record.
    pub overall_probability: Option<Decimal>,
}

impl DerivedView {
    /// The city record, if the snapshot carried one.
    pub const fn city(&self) -> Option<&City> {
        self.state.city.as_ref()
    }
}

/// Rebuild the derived view from a raw ledger snapshot.
///
/// Runs the full pipeline — ingest, display filter, spatial allocation,
/// headline economics — and packages the result. Called once per
/// snapshot; the caller replaces its previous view atomically.
///
/// # Errors
///
/// Propagates [`StateError`] from ingestion, [`GeoError`] from
/// allocation, and [`EconError`] from parameter validation, uninterpreted:
/// a corrupted snapshot must not be displayed or priced.
pub fn recompute(
    snapshot: &Snapshot,
    roads: &[Road],
    params: &AaParams,
    filter: UnitFilter,
) -> Result<DerivedView, ViewError> {
    validate_params(params)?;

    let state = ingest(snapshot)?;
    debug!(units = state.units.len(), "ingest phase complete");

    let layout = allocate(&state.units, roads, filter)?;
    debug!(placed = layout.placed.len(), "allocation phase complete");

    let price = plot_price(params)?;
    let probability = state.city.as_ref().map(|city| {
        let placed_units: Vec<_> = layout
            .placed
            .iter()
            .map(|placed| placed.unit.clone())
            .collect();
        overall_probability(
            &placed_units,
            city,
            params.matching_probability,
            params.referral_boost,
        )
    });

    Ok(DerivedView {
        state,
        layout,
        plot_price: price,
        overall_probability: probability,
    })
}
