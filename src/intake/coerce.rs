//! Lenient coercion of raw form values.
//!
//! Blank or unparsable input never fails here: the field takes its default
//! and a [`CoercionNote`] records what happened. Real invalidity surfaces at
//! the classifier boundary instead.

use serde::{Deserialize, Serialize};

use crate::models::{FeatureField, FieldKind};

use super::FieldValue;

/// Why a value was replaced by the field default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionReason {
    /// The field was never submitted.
    Missing,
    /// Submitted as an empty string.
    Blank,
    /// Submitted but not readable as the field's kind.
    Unparsable,
}

/// Audit entry for one defaulted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionNote {
    pub field: FeatureField,
    /// Raw text as submitted (`None` when missing).
    pub raw: Option<String>,
    pub reason: CoercionReason,
    pub substituted: f64,
}

/// Coerce a raw value into the field's numeric encoding, falling back to the
/// field default.
pub fn coerce_or_default(
    field: FeatureField,
    raw: Option<&FieldValue>,
) -> (f64, Option<CoercionNote>) {
    let default = field.default_value();
    let Some(raw) = raw else {
        return (default, Some(note(field, None, CoercionReason::Missing, default)));
    };

    let parsed = match field.kind() {
        FieldKind::Measurement => parse_measurement(raw),
        FieldKind::Count => parse_count(raw),
        FieldKind::Flag => parse_flag(raw),
    };

    match parsed {
        Ok(value) => (value, None),
        Err(reason) => {
            tracing::debug!(
                field = field.as_str(),
                raw = %raw,
                reason = ?reason,
                "Defaulting unusable form value"
            );
            (default, Some(note(field, Some(raw.to_string()), reason, default)))
        }
    }
}

fn note(
    field: FeatureField,
    raw: Option<String>,
    reason: CoercionReason,
    substituted: f64,
) -> CoercionNote {
    CoercionNote {
        field,
        raw,
        reason,
        substituted,
    }
}

fn parse_measurement(raw: &FieldValue) -> Result<f64, CoercionReason> {
    match raw {
        FieldValue::Number(n) if n.is_finite() => Ok(*n),
        FieldValue::Number(_) => Err(CoercionReason::Unparsable),
        FieldValue::Flag(b) => Ok(if *b { 1.0 } else { 0.0 }),
        FieldValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(CoercionReason::Blank);
            }
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(CoercionReason::Unparsable),
            }
        }
    }
}

fn parse_count(raw: &FieldValue) -> Result<f64, CoercionReason> {
    let value = parse_measurement(raw)?;
    if value < 0.0 {
        return Err(CoercionReason::Unparsable);
    }
    Ok(value.trunc())
}

fn parse_flag(raw: &FieldValue) -> Result<f64, CoercionReason> {
    match raw {
        FieldValue::Flag(b) => Ok(if *b { 1.0 } else { 0.0 }),
        FieldValue::Number(n) if *n == 1.0 => Ok(1.0),
        FieldValue::Number(n) if *n == 0.0 => Ok(0.0),
        FieldValue::Number(_) => Err(CoercionReason::Unparsable),
        FieldValue::Text(s) => {
            let lower = s.trim().to_lowercase();
            match lower.as_str() {
                "" => Err(CoercionReason::Blank),
                "yes" | "y" | "true" | "1" => Ok(1.0),
                "no" | "n" | "false" | "0" => Ok(0.0),
                _ => Err(CoercionReason::Unparsable),
            }
        }
    }
}
