//! Governance vote tallying.
//!
//! Each `votes_<address>` entry maps a vote key (the governed parameter
//! name, optionally carrying a sub-scope suffix) to a weighted proposed
//! value. The tally groups by the full vote key, then by proposed value,
//! collecting every `(address, balance)` contribution for that value.

use std::collections::BTreeMap;

use citylens_types::VoteWeight;

use crate::error::StateError;
use crate::records::VoteEntryRecord;

/// Per parameter, per proposed value, the weighted supporters.
///
/// The proposed value is keyed by its canonical text form so numeric and
/// string proposals tally uniformly.
pub type GovernanceTally = BTreeMap<String, BTreeMap<String, Vec<VoteWeight>>>;

/// Fold one address's vote record into the tally.
///
/// # Errors
///
/// Returns [`StateError::BadVoteValue`] if the record is not a map of
/// `{balance, value}` entries.
pub(crate) fn tally_votes(
    tally: &mut GovernanceTally,
    key: &str,
    address: &str,
    raw: &serde_json::Value,
) -> Result<(), StateError> {
    let record: BTreeMap<String, VoteEntryRecord> = serde_json::from_value(raw.clone())
        .map_err(|_| StateError::BadVoteValue {
            key: key.to_owned(),
        })?;

    for (parameter, entry) in record {
        let value_key = canonical_value(&entry.value);
        tally
            .entry(parameter)
            .or_default()
            .entry(value_key)
            .or_default()
            .push(VoteWeight {
                address: address.to_owned(),
                balance: entry.balance,
            });
    }
    Ok(())
}

/// Canonical text form of a proposed value.
///
/// Strings are used verbatim; everything else uses its JSON rendering, so
/// `0.1` and `"0.1"` tally into the same bucket.
fn canonical_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
