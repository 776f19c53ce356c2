//! Rule-based recommendation engine: maps a feature row and a prediction to
//! a ranked list of advisory records.

pub mod engine;
pub mod messages;
pub mod rules;

pub use engine::{evaluate, evaluate_with};
pub use messages::{AdviceText, MEDICAL_DISCLAIMER, NO_RECOMMENDATIONS_MESSAGE};
pub use rules::{clinical_rules, Rule, Tier, TierPolicy};
