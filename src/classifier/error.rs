use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Prediction diagnostics
// ---------------------------------------------------------------------------

/// What the loaded model declares as its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedFeatureSpec {
    pub count: usize,
    /// Empty when the model only publishes a count.
    pub names: Vec<String>,
}

/// What the assembled row actually offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedShape {
    pub count: usize,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionErrorKind {
    FeatureCountMismatch,
    FeatureNameMismatch,
    NonFiniteInput,
    ModelFailure,
}

/// Diagnostic returned instead of a label. Never replaced by a guess.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Prediction failed ({kind:?}): {message}")]
pub struct PredictionError {
    pub kind: PredictionErrorKind,
    pub message: String,
    pub expected: ExpectedFeatureSpec,
    pub received: ReceivedShape,
}

// ---------------------------------------------------------------------------
// Error enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ClassifierError {
    #[error("Model unavailable at {path}: {reason}")]
    ModelUnavailable { path: String, reason: String },

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl ClassifierError {
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, ClassifierError::ModelUnavailable { .. })
    }

    pub fn prediction(&self) -> Option<&PredictionError> {
        match self {
            ClassifierError::Prediction(e) => Some(e),
            ClassifierError::ModelUnavailable { .. } => None,
        }
    }
}

/// Problems reading or validating a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("No model artifact found at {0}")]
    NotFound(String),

    #[error("Failed to read {0}: {1}")]
    Io(String, String),

    #[error("Artifact parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Invalid artifact: {0}")]
    Invalid(String),

    #[error("Unsupported artifact format: {0}")]
    UnsupportedFormat(String),

    #[error("Model runtime initialisation failed: {0}")]
    Runtime(String),
}
