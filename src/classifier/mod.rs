//! Classifier adapter: loads the pre-fitted model once and turns a
//! [`FeatureRow`](crate::models::FeatureRow) into a [`PredictionLabel`].

pub mod adapter;
pub mod cache;
pub mod error;
pub mod linear;
pub mod loader;
#[cfg(feature = "onnx-classifier")]
pub mod onnx;

use crate::models::PredictionLabel;

pub use adapter::{ClassifierAdapter, ModelInfo, ZeroFillDebug, ZeroFillPrediction, ZeroFillStrategy};
pub use cache::{shared_cache, ModelCache};
pub use error::{
    ArtifactError, ClassifierError, ExpectedFeatureSpec, PredictionError, PredictionErrorKind,
    ReceivedShape,
};
pub use linear::{LinearArtifact, LinearClassifier, LinearFormat, StandardScaler};

/// A fitted binary model. Backends only score vectors; row encoding and
/// shape validation belong to [`ClassifierAdapter`].
pub trait Classifier: Send + Sync {
    /// Short identifier of the backend (e.g. `logistic_regression`).
    fn format(&self) -> &'static str;

    /// Declared input column names, in model order. Empty when the model
    /// only publishes a count.
    fn feature_names(&self) -> &[String];

    fn feature_count(&self) -> usize;

    /// Score one vector laid out in `feature_names()` order.
    fn predict(&self, features: &[f64]) -> Result<PredictionLabel, String>;
}
