//! The raw ledger snapshot: a flat, string-keyed map of JSON values.
//!
//! The external ledger-subscription collaborator replaces the snapshot
//! wholesale whenever relevant keys change; the core never mutates it.
//! Keys follow the grammar `plot_<n>`, `house_<n>`, `city_<name>`,
//! `match_<p1>_<p2>`, `votes_<address>`, `user_<address>`,
//! `shortcode_<code>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An immutable view of the ledger's state variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, serde_json::Value>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Look up a raw value by its exact key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Snapshot {
    fn from(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, serde_json::Value)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
