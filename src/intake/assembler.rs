use serde::{Deserialize, Serialize};

use crate::models::{FeatureField, FeatureRow};

use super::calendar::{parse_report_date, week_of_season};
use super::coerce::{coerce_or_default, CoercionNote, CoercionReason};
use super::{FieldValue, StageFields};

/// Keys that carry the report date used to derive `week_of_season`.
pub const REPORT_DATE_KEYS: [&str; 2] = ["report_date", "date"];

/// Result of assembling the two form stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub row: FeatureRow,
    /// Every field that fell back to its default, in canonical order.
    pub notes: Vec<CoercionNote>,
}

impl Assembly {
    pub fn is_clean(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Merge two stages. Keys present in both take the value from `second`.
pub fn merge_stages(first: &StageFields, second: &StageFields) -> StageFields {
    let mut merged = first.clone();
    merged.extend(second.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Merge the vitals and symptom stages and coerce every field into a
/// fully-populated row.
pub fn assemble(vitals: &StageFields, symptoms: &StageFields) -> Assembly {
    let merged = merge_stages(vitals, symptoms);
    log_unknown_keys(&merged);

    let mut row = FeatureRow::default();
    let mut notes = Vec::new();

    for field in FeatureField::ALL {
        let raw = lookup(&merged, field);

        if field == FeatureField::WeekOfSeason {
            let (week, note) = resolve_week(&merged, raw);
            row.set(field, week);
            notes.extend(note);
            continue;
        }

        let (value, note) = coerce_or_default(field, raw);
        row.set(field, value);
        notes.extend(note);
    }

    Assembly { row, notes }
}

/// Canonical name first, then aliases in declaration order.
fn lookup<'a>(fields: &'a StageFields, field: FeatureField) -> Option<&'a FieldValue> {
    fields.get(field.as_str()).or_else(|| {
        field
            .aliases()
            .iter()
            .find_map(|alias| fields.get(*alias))
    })
}

/// An explicit week wins; otherwise derive it from the report date. A
/// rejected explicit week is always noted, even when the date fills in.
fn resolve_week(fields: &StageFields, explicit: Option<&FieldValue>) -> (f64, Option<CoercionNote>) {
    let field = FeatureField::WeekOfSeason;
    let default = field.default_value();

    let rejected = match explicit {
        Some(raw) => {
            let (value, note) = coerce_or_default(field, Some(raw));
            if note.is_none() && value >= 1.0 {
                return (value, None);
            }
            Some(note.unwrap_or_else(|| CoercionNote {
                field,
                raw: Some(raw.to_string()),
                reason: CoercionReason::Unparsable,
                substituted: default,
            }))
        }
        None => None,
    };

    let date_raw = REPORT_DATE_KEYS.iter().find_map(|k| fields.get(*k));
    if let Some(FieldValue::Text(text)) = date_raw {
        if let Some(date) = parse_report_date(text) {
            let week = f64::from(week_of_season(date));
            let note = rejected.map(|n| CoercionNote {
                substituted: week,
                ..n
            });
            return (week, note);
        }
    }

    if rejected.is_some() {
        return (default, rejected);
    }
    let note = CoercionNote {
        field,
        raw: date_raw.map(|v| v.to_string()),
        reason: if date_raw.is_some() {
            CoercionReason::Unparsable
        } else {
            CoercionReason::Missing
        },
        substituted: default,
    };
    (default, Some(note))
}

fn log_unknown_keys(fields: &StageFields) {
    for key in fields.keys() {
        if FeatureField::from_name(key).is_none() && !REPORT_DATE_KEYS.contains(&key.as_str()) {
            tracing::debug!(field = %key, "Ignoring form field that is not a model feature");
        }
    }
}
