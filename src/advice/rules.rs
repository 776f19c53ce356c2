//! Declarative advisory rules, grouped by tier.
//!
//! Tier policies:
//! - Danger: every firing rule is emitted, then evaluation stops.
//! - Warning: accumulates.
//! - Info: only runs while nothing has been emitted yet.
//! - Prevention: always runs (unless Danger already stopped evaluation).

use serde::{Deserialize, Serialize};

use crate::models::{AdvisoryRecord, FeatureRow, PredictionLabel, Severity};

use super::messages::{self, AdviceText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Danger,
    Warning,
    Info,
    Prevention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierPolicy {
    /// Emit matches; if any matched, return immediately.
    ShortCircuit,
    /// Emit matches and continue.
    Accumulate,
    /// Run only when no record has been emitted so far.
    OnlyIfEmpty,
}

impl Tier {
    /// Evaluation order.
    pub const ORDER: [Tier; 4] = [Tier::Danger, Tier::Warning, Tier::Info, Tier::Prevention];

    pub fn severity(self) -> Severity {
        match self {
            Tier::Danger => Severity::Danger,
            Tier::Warning => Severity::Warning,
            Tier::Info | Tier::Prevention => Severity::Info,
        }
    }

    pub fn policy(self) -> TierPolicy {
        match self {
            Tier::Danger => TierPolicy::ShortCircuit,
            Tier::Warning | Tier::Prevention => TierPolicy::Accumulate,
            Tier::Info => TierPolicy::OnlyIfEmpty,
        }
    }
}

pub type Predicate = fn(&FeatureRow, PredictionLabel) -> bool;

/// One predicate → record entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    pub tier: Tier,
    pub predicate: Predicate,
    pub text: AdviceText,
}

impl Rule {
    pub fn fires(&self, row: &FeatureRow, label: PredictionLabel) -> bool {
        (self.predicate)(row, label)
    }

    pub fn record(&self) -> AdvisoryRecord {
        AdvisoryRecord {
            rule_key: self.key.to_string(),
            title: self.text.title.to_string(),
            message: self.text.message.to_string(),
            source: self.text.source.to_string(),
            severity: self.tier.severity(),
        }
    }
}

// Thresholds
pub const O2S_LOW_BELOW: f64 = 95.0;
pub const RR_HIGH_ABOVE: f64 = 24.0;
pub const TEMP_EXTREME_ABOVE: f64 = 40.0;
pub const SBP_LOW_BELOW: f64 = 90.0;
pub const FEVER_ABOVE: f64 = 38.0;

fn o2s_low(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.oxygen_saturation_pct < O2S_LOW_BELOW
}

fn rr_high(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.respiratory_rate > RR_HIGH_ABOVE
}

fn temp_extreme(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.temperature_c > TEMP_EXTREME_ABOVE
}

fn sbp_low(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.systolic_bp < SBP_LOW_BELOW
}

fn fever(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.temperature_c > FEVER_ABOVE
}

fn chronic_lung(row: &FeatureRow, _: PredictionLabel) -> bool {
    row.has_chronic_lung_disease
}

fn predicted_infected(_: &FeatureRow, label: PredictionLabel) -> bool {
    label == PredictionLabel::Infected
}

fn predicted_not_infected(_: &FeatureRow, label: PredictionLabel) -> bool {
    label == PredictionLabel::NotInfected
}

fn unvaccinated(row: &FeatureRow, _: PredictionLabel) -> bool {
    !row.flu_vaccinated
}

static CLINICAL_RULES: [Rule; 9] = [
    Rule {
        key: "O2S_LOW",
        tier: Tier::Danger,
        predicate: o2s_low,
        text: messages::O2S_LOW,
    },
    Rule {
        key: "RR_HIGH",
        tier: Tier::Danger,
        predicate: rr_high,
        text: messages::RR_HIGH,
    },
    Rule {
        key: "TEMP_EXTREME",
        tier: Tier::Danger,
        predicate: temp_extreme,
        text: messages::TEMP_EXTREME,
    },
    Rule {
        key: "SBP_LOW",
        tier: Tier::Danger,
        predicate: sbp_low,
        text: messages::SBP_LOW,
    },
    Rule {
        key: "FEVER",
        tier: Tier::Warning,
        predicate: fever,
        text: messages::FEVER,
    },
    Rule {
        key: "CHRONIC_LUNG_DISEASE",
        tier: Tier::Warning,
        predicate: chronic_lung,
        text: messages::CHRONIC_LUNG,
    },
    Rule {
        key: "SELF_CARE",
        tier: Tier::Info,
        predicate: predicted_infected,
        text: messages::SELF_CARE,
    },
    Rule {
        key: "GENERAL_ADVICE",
        tier: Tier::Info,
        predicate: predicted_not_infected,
        text: messages::GENERAL_ADVICE,
    },
    Rule {
        key: "FLU_VACCINATION",
        tier: Tier::Prevention,
        predicate: unvaccinated,
        text: messages::VACCINATION,
    },
];

/// The built-in clinical rule set, in display order within each tier.
pub fn clinical_rules() -> &'static [Rule] {
    &CLINICAL_RULES
}
