use serde::{Deserialize, Serialize};

/// Severity determines how a record is rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Educational or preventive guidance.
    Info,
    /// Elevated risk: see a doctor.
    Warning,
    /// Life-threatening sign: seek immediate care.
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
            Self::Danger => "🚨",
        }
    }
}

/// One piece of displayed clinical guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    /// Stable identifier of the rule that produced this record (e.g. `O2S_LOW`).
    pub rule_key: String,
    pub title: String,
    pub message: String,
    pub source: String,
    pub severity: Severity,
}
