use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{FeatureField, FeatureRow, PredictionLabel};

use super::error::{
    ClassifierError, ExpectedFeatureSpec, PredictionError, PredictionErrorKind, ReceivedShape,
};
use super::loader::load_classifier;
use super::Classifier;

/// Serializable summary of the loaded model, for debug views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub format: String,
    pub source: PathBuf,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    pub allow_zero_fill: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroFillStrategy {
    /// Shapes matched; nothing was filled.
    NotNeeded,
    /// Row values placed under matching model feature names.
    ByName,
    /// Model publishes no names; row values copied by position.
    ByIndex,
}

/// Debug payload reported alongside every zero-fill prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroFillDebug {
    pub strategy: ZeroFillStrategy,
    pub expected: ExpectedFeatureSpec,
    pub received: ReceivedShape,
    /// Model columns that received a row value.
    pub matched: Vec<String>,
    /// Model columns that were set to zero.
    pub zero_filled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroFillPrediction {
    pub label: PredictionLabel,
    pub debug: ZeroFillDebug,
}

/// Owns the single authoritative row-to-vector encoding for a loaded model.
pub struct ClassifierAdapter {
    model: Arc<dyn Classifier>,
    source: PathBuf,
    allow_zero_fill: bool,
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("model", &self.describe())
            .finish()
    }
}

impl ClassifierAdapter {
    pub fn new(model: Arc<dyn Classifier>, source: impl Into<PathBuf>, allow_zero_fill: bool) -> Self {
        Self {
            model,
            source: source.into(),
            allow_zero_fill,
        }
    }

    /// Load the artifact at `location`. Any failure is reported as
    /// `ModelUnavailable`.
    pub fn load(location: &Path, allow_zero_fill: bool) -> Result<Self, ClassifierError> {
        match load_classifier(location) {
            Ok((model, source)) => {
                tracing::info!(
                    path = %source.display(),
                    format = model.format(),
                    features = model.feature_count(),
                    "Classifier loaded"
                );
                Ok(Self::new(model, source, allow_zero_fill))
            }
            Err(e) => {
                tracing::warn!(path = %location.display(), error = %e, "Classifier unavailable");
                Err(ClassifierError::ModelUnavailable {
                    path: location.display().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn describe(&self) -> ModelInfo {
        ModelInfo {
            format: self.model.format().to_string(),
            source: self.source.clone(),
            feature_count: self.model.feature_count(),
            feature_names: self.model.feature_names().to_vec(),
            allow_zero_fill: self.allow_zero_fill,
        }
    }

    pub fn allows_zero_fill(&self) -> bool {
        self.allow_zero_fill
    }

    fn expected(&self) -> ExpectedFeatureSpec {
        ExpectedFeatureSpec {
            count: self.model.feature_count(),
            names: self.model.feature_names().to_vec(),
        }
    }

    fn received() -> ReceivedShape {
        ReceivedShape {
            count: FeatureField::COUNT,
            names: FeatureRow::field_names(),
        }
    }

    fn error(&self, kind: PredictionErrorKind, message: String) -> PredictionError {
        PredictionError {
            kind,
            message,
            expected: self.expected(),
            received: Self::received(),
        }
    }

    /// Map the model's declared columns onto row fields, or explain why not.
    fn resolve_columns(&self) -> Result<Vec<FeatureField>, PredictionError> {
        let count = self.model.feature_count();
        if count != FeatureField::COUNT {
            return Err(self.error(
                PredictionErrorKind::FeatureCountMismatch,
                format!(
                    "model expects {} features but input has {}",
                    count,
                    FeatureField::COUNT
                ),
            ));
        }

        let names = self.model.feature_names();
        if names.is_empty() {
            return Ok(FeatureField::ALL.to_vec());
        }

        let mut columns = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            match FeatureField::from_name(name) {
                Some(field) => columns.push(field),
                None => unknown.push(name.clone()),
            }
        }

        let distinct: HashSet<FeatureField> = columns.iter().copied().collect();
        let missing: Vec<&str> = FeatureField::ALL
            .iter()
            .filter(|f| !distinct.contains(f))
            .map(|f| f.as_str())
            .collect();

        if !unknown.is_empty() || !missing.is_empty() {
            return Err(self.error(
                PredictionErrorKind::FeatureNameMismatch,
                format!(
                    "model feature names do not match input: unknown [{}], not covered [{}]",
                    unknown.join(", "),
                    missing.join(", ")
                ),
            ));
        }

        Ok(columns)
    }

    fn run(&self, features: &[f64]) -> Result<PredictionLabel, PredictionError> {
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(self.error(
                PredictionErrorKind::NonFiniteInput,
                format!("input column {i} is not a finite number"),
            ));
        }
        self.model
            .predict(features)
            .map_err(|msg| self.error(PredictionErrorKind::ModelFailure, msg))
    }

    /// Strict prediction. Any shape or name mismatch is an error; no label is
    /// ever guessed.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionLabel, ClassifierError> {
        let result = self
            .resolve_columns()
            .and_then(|columns| self.run(&row.encode(&columns)));

        match result {
            Ok(label) => {
                tracing::debug!(label = label.as_str(), "Prediction complete");
                Ok(label)
            }
            Err(e) => {
                tracing::warn!(
                    kind = ?e.kind,
                    expected = e.expected.count,
                    received = e.received.count,
                    "Prediction failed: {}",
                    e.message
                );
                Err(e.into())
            }
        }
    }

    /// Opt-in escape hatch: on a shape mismatch, place matching row values
    /// into a zero vector of the model's size and predict anyway. Results may
    /// be unreliable; the debug payload says exactly what was filled.
    pub fn predict_zero_fill(&self, row: &FeatureRow) -> Result<ZeroFillPrediction, ClassifierError> {
        let mismatch = match self.predict(row) {
            Ok(label) => {
                return Ok(ZeroFillPrediction {
                    label,
                    debug: ZeroFillDebug {
                        strategy: ZeroFillStrategy::NotNeeded,
                        expected: self.expected(),
                        received: Self::received(),
                        matched: self.expected().names,
                        zero_filled: Vec::new(),
                    },
                });
            }
            Err(ClassifierError::Prediction(e))
                if matches!(
                    e.kind,
                    PredictionErrorKind::FeatureCountMismatch
                        | PredictionErrorKind::FeatureNameMismatch
                ) =>
            {
                e
            }
            Err(e) => return Err(e),
        };

        if !self.allow_zero_fill {
            return Err(mismatch.into());
        }

        let (features, fill) = self.zero_fill(row);
        tracing::warn!(
            strategy = ?fill.strategy,
            matched = fill.matched.len(),
            zero_filled = fill.zero_filled.len(),
            "Predicting with zero-filled features; result may be unreliable"
        );
        let label = self.run(&features)?;
        Ok(ZeroFillPrediction { label, debug: fill })
    }

    fn zero_fill(&self, row: &FeatureRow) -> (Vec<f64>, ZeroFillDebug) {
        let count = self.model.feature_count();
        let names = self.model.feature_names();
        let mut features = vec![0.0; count];
        let mut matched = Vec::new();
        let mut zero_filled = Vec::new();

        let strategy = if names.is_empty() {
            let entries = row.entries();
            for (i, slot) in features.iter_mut().enumerate() {
                match entries.get(i) {
                    Some((field, value)) => {
                        *slot = *value;
                        matched.push(format!("f{i}:{field}"));
                    }
                    None => zero_filled.push(format!("f{i}")),
                }
            }
            ZeroFillStrategy::ByIndex
        } else {
            for (slot, name) in features.iter_mut().zip(names) {
                match FeatureField::from_name(name) {
                    Some(field) => {
                        *slot = row.value(field);
                        matched.push(name.clone());
                    }
                    None => zero_filled.push(name.clone()),
                }
            }
            ZeroFillStrategy::ByName
        };

        let debug = ZeroFillDebug {
            strategy,
            expected: self.expected(),
            received: Self::received(),
            matched,
            zero_filled,
        };
        (features, debug)
    }
}
