//! ONNX Runtime backend, behind the `onnx-classifier` feature.
//!
//! Expects a model taking one `[1, n]` f32 input and returning the class label
//! as its first output (i64), which is what sklearn/xgboost converters emit.
//! Feature names come from a sidecar `<stem>.features.json` (a JSON list).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ort::session::Session;

use crate::models::PredictionLabel;

use super::error::ArtifactError;
use super::Classifier;

/// `Session::run` takes `&mut self`; the mutex serialises inference.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    feature_names: Vec<String>,
}

impl OnnxClassifier {
    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            return Err(ArtifactError::NotFound(model_path.display().to_string()));
        }

        let names_path = sidecar_path(model_path);
        let names_json = std::fs::read_to_string(&names_path)
            .map_err(|e| ArtifactError::Io(names_path.display().to_string(), e.to_string()))?;
        let feature_names: Vec<String> = serde_json::from_str(&names_json)
            .map_err(|e| ArtifactError::Parse(names_path.display().to_string(), e.to_string()))?;
        if feature_names.is_empty() {
            return Err(ArtifactError::Invalid("ONNX sidecar lists no features".into()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ArtifactError::Runtime(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e: ort::Error| ArtifactError::Runtime(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ArtifactError::Runtime(format!("ONNX load failed: {e}")))?;

        tracing::info!(
            path = %model_path.display(),
            features = feature_names.len(),
            "ONNX classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            feature_names,
        })
    }
}

fn sidecar_path(model_path: &Path) -> PathBuf {
    let stem = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("classifier");
    model_path.with_file_name(format!("{stem}.features.json"))
}

impl Classifier for OnnxClassifier {
    fn format(&self) -> &'static str {
        "onnx"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &[f64]) -> Result<PredictionLabel, String> {
        use ort::value::TensorRef;

        let values: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = ndarray::Array2::from_shape_vec((1, values.len()), values)
            .map_err(|e| e.to_string())?;
        let tensor = TensorRef::from_array_view(&input).map_err(|e| e.to_string())?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| "Session lock poisoned".to_string())?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| format!("ONNX inference failed: {e}"))?;

        let (_, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .map_err(|e| format!("Output extraction: {e}"))?;

        let class = labels
            .first()
            .copied()
            .ok_or_else(|| "ONNX model returned no label".to_string())?;

        PredictionLabel::from_class(class)
            .ok_or_else(|| format!("ONNX model returned unknown class {class}"))
    }
}
