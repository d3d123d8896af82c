//! Single-pass snapshot ingestion.
//!
//! One scan over the snapshot dispatches on key prefix and rebuilds the
//! full typed state: map units, the city record, the symmetric match
//! index, the governance tally, shortcode listings, and per-address user
//! records. Unknown prefixes are skipped (forward compatibility); a
//! recognized prefix with a wrong-shaped payload aborts the pass.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use citylens_types::{
    City, House, HouseNum, MapUnit, NeighborMatch, Plot, PlotNum, UnitInfo,
};

use crate::error::StateError;
use crate::records::{CityRecord, HouseRecord, MatchRecord, PlotRecord, ShortcodeRecord};
use crate::snapshot::Snapshot;
use crate::votes::{GovernanceTally, tally_votes};

/// The fully typed state reconstructed from one ledger snapshot.
///
/// A fresh value replaces the previous one wholesale on every snapshot;
/// nothing here is ever patched in place.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CityState {
    /// All plots and houses, in snapshot key order.
    pub units: Vec<MapUnit>,
    /// The aggregate city record, if the snapshot carries one.
    pub city: Option<City>,
    /// Symmetric neighbor-match index: every stored match appears twice,
    /// once per participating plot, each naming the other side.
    pub matches: BTreeMap<PlotNum, NeighborMatch>,
    /// Governance votes grouped by parameter and proposed value.
    pub votes: GovernanceTally,
    /// Shortcode listings: alias to the house it names.
    pub shortcodes: BTreeMap<String, HouseNum>,
    /// Per-address user records.
    pub users: BTreeMap<String, UnitInfo>,
}

impl CityState {
    /// Look up a plot by number.
    pub fn plot(&self, num: PlotNum) -> Option<&Plot> {
        self.units.iter().find_map(|unit| match unit {
            MapUnit::Plot(plot) if plot.plot_num == num => Some(plot),
            MapUnit::Plot(_) | MapUnit::House(_) => None,
        })
    }

    /// Look up a house by number.
    pub fn house(&self, num: HouseNum) -> Option<&House> {
        self.units.iter().find_map(|unit| match unit {
            MapUnit::House(house) if house.house_num == num => Some(house),
            MapUnit::Plot(_) | MapUnit::House(_) => None,
        })
    }

    /// The match a plot participates in, if any.
    pub fn neighbor_of(&self, num: PlotNum) -> Option<&NeighborMatch> {
        self.matches.get(&num)
    }
}

/// Rebuild the typed city state from a raw snapshot.
///
/// # Errors
///
/// Returns [`StateError`] on the first entry whose key or value does not
/// match its recognized shape. Optional fields default; structural
/// corruption does not.
pub fn ingest(snapshot: &Snapshot) -> Result<CityState, StateError> {
    let mut state = CityState::default();

    for (key, value) in snapshot.iter() {
        if let Some(suffix) = key.strip_prefix("plot_") {
            let num = parse_num(key, suffix)?;
            let plot = parse_plot(key, PlotNum::new(num), value)?;
            state.units.push(MapUnit::Plot(plot));
        } else if let Some(suffix) = key.strip_prefix("house_") {
            let num = parse_num(key, suffix)?;
            let house = parse_house(key, HouseNum::new(num), value)?;
            state.units.push(MapUnit::House(house));
        } else if let Some(name) = key.strip_prefix("city_") {
            state.city = Some(parse_city(key, name, value)?);
        } else if let Some(suffix) = key.strip_prefix("match_") {
            insert_match(&mut state.matches, key, suffix, value)?;
        } else if let Some(address) = key.strip_prefix("votes_") {
            tally_votes(&mut state.votes, key, address, value)?;
        } else if let Some(address) = key.strip_prefix("user_") {
            state
                .users
                .insert(address.to_owned(), UnitInfo::decode(value));
        } else if let Some(code) = key.strip_prefix("shortcode_") {
            let record: ShortcodeRecord =
                serde_json::from_value(value.clone()).map_err(|err| {
                    StateError::MalformedValue {
                        key: key.to_owned(),
                        reason: err.to_string(),
                    }
                })?;
            state
                .shortcodes
                .insert(code.to_owned(), HouseNum::new(record.house_num()));
        }
        // Any other prefix belongs to a future ledger version; skip it.
    }

    tracing::debug!(
        units = state.units.len(),
        matches = state.matches.len(),
        voters = state.votes.len(),
        "ledger snapshot ingested"
    );
    Ok(state)
}

/// Parse the numeric suffix of a `plot_<n>` / `house_<n>` key.
fn parse_num(key: &str, suffix: &str) -> Result<u64, StateError> {
    suffix.parse().map_err(|_| StateError::BadKey {
        key: key.to_owned(),
    })
}

/// Convert unix seconds into a timestamp, rejecting out-of-range values.
fn decode_ts(key: &str, seconds: i64) -> Result<DateTime<Utc>, StateError> {
    DateTime::from_timestamp(seconds, 0).ok_or(StateError::BadTimestamp {
        key: key.to_owned(),
        seconds,
    })
}

/// Reject negative magnitudes.
fn require_non_negative(key: &str, amount: Decimal) -> Result<(), StateError> {
    if amount < Decimal::ZERO {
        return Err(StateError::NegativeAmount {
            key: key.to_owned(),
            amount,
        });
    }
    Ok(())
}

fn parse_plot(key: &str, num: PlotNum, value: &serde_json::Value) -> Result<Plot, StateError> {
    let record: PlotRecord =
        serde_json::from_value(value.clone()).map_err(|err| StateError::MalformedValue {
            key: key.to_owned(),
            reason: err.to_string(),
        })?;

    require_non_negative(key, record.amount)?;
    if let Some(rented) = record.rented_amount {
        require_non_negative(key, rented)?;
    }
    if let Some(price) = record.sale_price {
        require_non_negative(key, price)?;
    }

    Ok(Plot {
        plot_num: num,
        status: record.status,
        x: record.x,
        y: record.y,
        amount: record.amount,
        owner: record.owner,
        info: record.info.as_ref().map(UnitInfo::decode),
        created_at: decode_ts(key, record.ts)?,
        rented_amount: record.rented_amount,
        rental_expiry: record
            .rental_expiry_ts
            .map(|ts| decode_ts(key, ts))
            .transpose()?,
        sale_price: record.sale_price,
        // Zero is a reserved plot number; a stored zero means no referral.
        ref_plot_num: record.ref_plot_num.filter(|&n| n != 0).map(PlotNum::new),
        referrer: record.referrer,
    })
}

fn parse_house(key: &str, num: HouseNum, value: &serde_json::Value) -> Result<House, StateError> {
    let record: HouseRecord =
        serde_json::from_value(value.clone()).map_err(|err| StateError::MalformedValue {
            key: key.to_owned(),
            reason: err.to_string(),
        })?;

    require_non_negative(key, record.amount)?;
    if let Some(price) = record.shortcode_price {
        require_non_negative(key, price)?;
    }

    Ok(House {
        house_num: num,
        plot_num: PlotNum::new(record.plot_num),
        x: record.x,
        y: record.y,
        amount: record.amount,
        owner: record.owner,
        info: record.info.as_ref().map(UnitInfo::decode),
        created_at: decode_ts(key, record.ts)?,
        shortcode: record.shortcode,
        shortcode_price: record.shortcode_price,
    })
}

fn parse_city(key: &str, name: &str, value: &serde_json::Value) -> Result<City, StateError> {
    let record: CityRecord =
        serde_json::from_value(value.clone()).map_err(|err| StateError::MalformedValue {
            key: key.to_owned(),
            reason: err.to_string(),
        })?;

    require_non_negative(key, record.total_land)?;
    require_non_negative(key, record.total_rented)?;
    require_non_negative(key, record.total_bought)?;

    Ok(City {
        name: name.to_owned(),
        total_land: record.total_land,
        total_rented: record.total_rented,
        total_bought: record.total_bought,
        count_plots: record.count_plots,
        count_houses: record.count_houses,
        mayor: record.mayor,
        started_at: decode_ts(key, record.start_ts)?,
        matching_probability: record.matching_probability,
        plot_price: record.plot_price,
        referral_boost: record.referral_boost,
    })
}

/// Decode a `match_<p1>_<p2>` entry and index it from both sides.
///
/// The double insertion is deliberate denormalization: either plot can
/// look up its neighbor in O(log n) without knowing which side of the
/// stored key it sits on.
fn insert_match(
    matches: &mut BTreeMap<PlotNum, NeighborMatch>,
    key: &str,
    suffix: &str,
    value: &serde_json::Value,
) -> Result<(), StateError> {
    let bad_key = || StateError::BadMatchKey {
        key: key.to_owned(),
    };

    let (first_part, second_part) = suffix.split_once('_').ok_or_else(bad_key)?;
    let p1: u64 = first_part.parse().map_err(|_| bad_key())?;
    let p2: u64 = second_part.parse().map_err(|_| bad_key())?;
    if p1 == 0 || p2 == 0 || p1 == p2 {
        return Err(bad_key());
    }

    let record: MatchRecord =
        serde_json::from_value(value.clone()).map_err(|err| StateError::MalformedValue {
            key: key.to_owned(),
            reason: err.to_string(),
        })?;
    let built_at = decode_ts(key, record.built_ts)?;

    for (this, other) in [(p1, p2), (p2, p1)] {
        matches.insert(
            PlotNum::new(this),
            NeighborMatch {
                plot_num: PlotNum::new(this),
                neighbor_plot: PlotNum::new(other),
                built_at,
                first: record.first.clone(),
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use citylens_types::PlotStatus;
    use rust_decimal_macros::dec;

    use super::*;

    fn snapshot_of(entries: &[(&str, serde_json::Value)]) -> Snapshot {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn plot_value() -> serde_json::Value {
        serde_json::json!({
            "status": "land",
            "x": 120, "y": 340,
            "amount": 100,
            "owner": "OWNER",
            "ts": 1_700_000_000,
        })
    }

    #[test]
    fn plot_identity_comes_from_key() {
        let snapshot = snapshot_of(&[("plot_7", plot_value())]);
        let state = ingest(&snapshot).unwrap_or_default();

        assert_eq!(state.units.len(), 1);
        let plot = state.plot(PlotNum::new(7));
        assert!(plot.is_some());
        if let Some(plot) = plot {
            assert_eq!(plot.status, PlotStatus::Land);
            assert_eq!(plot.amount, dec!(100));
            assert_eq!((plot.x, plot.y), (120, 340));
        }
    }

    #[test]
    fn house_and_city_parse() {
        let snapshot = snapshot_of(&[
            (
                "house_3",
                serde_json::json!({
                    "plot_num": 7, "x": 10, "y": 20,
                    "amount": 80, "ts": 1_700_000_100,
                    "shortcode": "rosecottage",
                }),
            ),
            (
                "city_main",
                serde_json::json!({
                    "total_land": 1000, "total_rented": 500,
                    "total_bought": 90000,
                    "count_plots": 12, "count_houses": 4,
                    "mayor": "MAYOR", "start_ts": 1_600_000_000,
                }),
            ),
        ]);
        let state = ingest(&snapshot).unwrap_or_default();

        let house = state.house(HouseNum::new(3));
        assert!(house.is_some());
        if let Some(house) = house {
            assert_eq!(house.plot_num, PlotNum::new(7));
            assert_eq!(house.shortcode.as_deref(), Some("rosecottage"));
        }

        let city = state.city;
        assert!(city.is_some());
        if let Some(city) = city {
            assert_eq!(city.name, "main");
            assert_eq!(city.total_land, dec!(1000));
            assert_eq!(city.count_houses, 4);
        }
    }

    #[test]
    fn match_is_readable_from_both_sides() {
        let snapshot = snapshot_of(&[(
            "match_7_9",
            serde_json::json!({"built_ts": 1_700_000_200, "first": "ALICE"}),
        )]);
        let state = ingest(&snapshot).unwrap_or_default();

        let from_seven = state.neighbor_of(PlotNum::new(7));
        let from_nine = state.neighbor_of(PlotNum::new(9));
        assert_eq!(
            from_seven.map(|m| m.neighbor_plot),
            Some(PlotNum::new(9)),
        );
        assert_eq!(from_nine.map(|m| m.neighbor_plot), Some(PlotNum::new(7)));
        assert_eq!(
            from_seven.and_then(|m| m.first.as_deref()),
            Some("ALICE"),
        );
    }

    #[test]
    fn match_with_zero_plot_fails() {
        let snapshot = snapshot_of(&[(
            "match_0_5",
            serde_json::json!({"built_ts": 1_700_000_200}),
        )]);
        assert_eq!(
            ingest(&snapshot),
            Err(StateError::BadMatchKey {
                key: "match_0_5".to_owned(),
            }),
        );
    }

    #[test]
    fn house_with_wrong_shape_fails() {
        let snapshot = snapshot_of(&[("house_3", serde_json::json!("not a record"))]);
        assert!(matches!(
            ingest(&snapshot),
            Err(StateError::MalformedValue { .. }),
        ));
    }

    #[test]
    fn negative_amount_fails() {
        let mut value = plot_value();
        value["amount"] = serde_json::json!(-5);
        let snapshot = snapshot_of(&[("plot_7", value)]);
        assert!(matches!(
            ingest(&snapshot),
            Err(StateError::NegativeAmount { .. }),
        ));
    }

    #[test]
    fn unknown_prefix_is_ignored() {
        let snapshot = snapshot_of(&[
            ("plot_7", plot_value()),
            ("constants", serde_json::json!({"whatever": true})),
            ("rev_12", serde_json::json!(3)),
        ]);
        let state = ingest(&snapshot).unwrap_or_default();
        assert_eq!(state.units.len(), 1);
    }

    #[test]
    fn structured_info_string_is_decoded() {
        let mut value = plot_value();
        value["info"] = serde_json::json!("{\"style\":\"tudor\"}");
        let snapshot = snapshot_of(&[("plot_7", value)]);
        let state = ingest(&snapshot).unwrap_or_default();

        let info = state
            .plot(PlotNum::new(7))
            .and_then(|plot| plot.info.as_ref());
        assert!(info.is_some_and(|info| info.as_fields().is_some()));
    }

    #[test]
    fn plain_info_string_is_kept_verbatim() {
        let mut value = plot_value();
        value["info"] = serde_json::json!("my lovely plot");
        let snapshot = snapshot_of(&[("plot_7", value)]);
        let state = ingest(&snapshot).unwrap_or_default();

        let info = state
            .plot(PlotNum::new(7))
            .and_then(|plot| plot.info.as_ref());
        assert_eq!(info.and_then(UnitInfo::as_text), Some("my lovely plot"));
    }

    #[test]
    fn shortcodes_and_users_are_indexed() {
        let snapshot = snapshot_of(&[
            ("shortcode_rose", serde_json::json!(3)),
            ("shortcode_tulip", serde_json::json!({"house_num": 4})),
            ("user_ALICE", serde_json::json!({"plots": 2})),
        ]);
        let state = ingest(&snapshot).unwrap_or_default();

        assert_eq!(state.shortcodes.get("rose"), Some(&HouseNum::new(3)));
        assert_eq!(state.shortcodes.get("tulip"), Some(&HouseNum::new(4)));
        assert!(state.users.contains_key("ALICE"));
    }

    #[test]
    fn zero_ref_plot_num_means_no_referral() {
        let mut value = plot_value();
        value["ref_plot_num"] = serde_json::json!(0);
        let snapshot = snapshot_of(&[("plot_7", value)]);
        let state = ingest(&snapshot).unwrap_or_default();

        let plot = state.plot(PlotNum::new(7));
        assert!(plot.is_some_and(|p| p.ref_plot_num.is_none()));
        assert!(plot.is_some_and(|p| !p.is_referred()));
    }

    #[test]
    fn non_numeric_plot_suffix_fails() {
        let snapshot = snapshot_of(&[("plot_abc", plot_value())]);
        assert_eq!(
            ingest(&snapshot),
            Err(StateError::BadKey {
                key: "plot_abc".to_owned(),
            }),
        );
    }
}
