use std::collections::HashSet;

use crate::models::{AdvisoryRecord, FeatureRow, PredictionLabel};

use super::rules::{clinical_rules, Rule, Tier, TierPolicy};

/// Evaluate the built-in clinical rules.
///
/// Total over any fully-populated row and any label. An empty result is a
/// legitimate outcome.
pub fn evaluate(row: &FeatureRow, label: PredictionLabel) -> Vec<AdvisoryRecord> {
    evaluate_with(clinical_rules(), row, label)
}

/// Generic tier runner over an arbitrary rule set.
///
/// Tiers run in [`Tier::ORDER`]; within a tier, rules keep their slice
/// order. A rule key is emitted at most once.
pub fn evaluate_with(rules: &[Rule], row: &FeatureRow, label: PredictionLabel) -> Vec<AdvisoryRecord> {
    let mut records: Vec<AdvisoryRecord> = Vec::new();
    let mut seen: HashSet<&'static str> = HashSet::new();

    for tier in Tier::ORDER {
        let policy = tier.policy();
        if policy == TierPolicy::OnlyIfEmpty && !records.is_empty() {
            tracing::debug!(tier = ?tier, "Skipping tier: advice already present");
            continue;
        }

        let mut fired = 0usize;
        for rule in rules.iter().filter(|r| r.tier == tier) {
            if !rule.fires(row, label) || !seen.insert(rule.key) {
                continue;
            }
            tracing::debug!(rule = rule.key, tier = ?tier, "Advisory rule fired");
            records.push(rule.record());
            fired += 1;
        }

        if policy == TierPolicy::ShortCircuit && fired > 0 {
            tracing::info!(
                tier = ?tier,
                count = fired,
                "Danger sign found, suppressing lower-tier advice"
            );
            return records;
        }
    }

    records
}
