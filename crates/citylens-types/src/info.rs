//! The free-form `info` attachment carried by plots, houses, and users.
//!
//! On the ledger, `info` is either a plain string or a string-keyed map of
//! primitive values — and, historically, sometimes a string that *contains*
//! an encoded map. Rather than sniffing types at every consumption site,
//! the shape is pinned down once at decode time into a tagged variant.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A primitive value inside a structured [`UnitInfo::Fields`] map.
///
/// Variant order matters for the untagged decode: JSON strings must land
/// in [`InfoValue::Text`] even when their content happens to look numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(untagged)]
pub enum InfoValue {
    /// A boolean field.
    Bool(bool),
    /// A string field.
    Text(String),
    /// A numeric field, kept in decimal precision.
    #[ts(as = "String")]
    Number(Decimal),
}

/// Free-form metadata attached to a map unit or user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(untagged)]
pub enum UnitInfo {
    /// Plain text, kept verbatim.
    Text(String),
    /// A structured string-keyed map of primitive values.
    Fields(BTreeMap<String, InfoValue>),
}

impl UnitInfo {
    /// Decode a raw snapshot value into its pinned-down shape.
    ///
    /// - A JSON object becomes [`UnitInfo::Fields`].
    /// - A JSON string is opportunistically parsed: if its content is an
    ///   encoded object of primitives it becomes [`UnitInfo::Fields`],
    ///   otherwise the string is kept verbatim as [`UnitInfo::Text`].
    /// - Any other value is kept as its canonical text.
    ///
    /// Decode failure is never an error: the fallback is always the
    /// original text.
    pub fn decode(raw: &serde_json::Value) -> Self {
        match raw {
            serde_json::Value::String(s) => {
                match serde_json::from_str::<BTreeMap<String, InfoValue>>(s) {
                    Ok(fields) => Self::Fields(fields),
                    Err(_) => Self::Text(s.clone()),
                }
            }
            serde_json::Value::Object(_) => {
                match serde_json::from_value::<BTreeMap<String, InfoValue>>(raw.clone()) {
                    Ok(fields) => Self::Fields(fields),
                    Err(_) => Self::Text(raw.to_string()),
                }
            }
            other => Self::Text(other.to_string()),
        }
    }

    /// Return the structured fields, if this info is structured.
    pub const fn as_fields(&self) -> Option<&BTreeMap<String, InfoValue>> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Text(_) => None,
        }
    }

    /// Return the plain text, if this info is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Fields(_) => None,
        }
    }
}
