//! Feature assembly: turns the two partial form stages into one
//! fully-populated [`FeatureRow`](crate::models::FeatureRow).

pub mod assembler;
pub mod calendar;
pub mod coerce;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use assembler::{assemble, merge_stages, Assembly, REPORT_DATE_KEYS};
pub use calendar::{parse_report_date, week_of_season};
pub use coerce::{coerce_or_default, CoercionNote, CoercionReason};

/// A raw value as submitted by the form layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Flag(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Field-name to value mapping for one form stage. Only submitted fields
/// are present.
pub type StageFields = BTreeMap<String, FieldValue>;

/// Build a [`StageFields`] from name/value pairs.
pub fn stage<I, K, V>(entries: I) -> StageFields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
