use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::ArtifactError;
use super::linear::LinearClassifier;
use super::Classifier;

/// Candidate file names inside an artifact directory, most preferred first.
/// A full preprocessing pipeline beats a bare model.
pub const ARTIFACT_CANDIDATES: [&str; 3] = [
    "model_pipeline.json",
    "classifier.json",
    "classifier.onnx",
];

/// Resolve the configured location to a concrete artifact file.
pub fn locate_artifact(location: &Path) -> Result<PathBuf, ArtifactError> {
    if location.is_file() {
        return Ok(location.to_path_buf());
    }
    if location.is_dir() {
        return ARTIFACT_CANDIDATES
            .iter()
            .map(|name| location.join(name))
            .find(|p| p.is_file() && is_supported(p))
            .ok_or_else(|| ArtifactError::NotFound(location.display().to_string()));
    }
    Err(ArtifactError::NotFound(location.display().to_string()))
}

fn is_supported(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => true,
        Some("onnx") => cfg!(feature = "onnx-classifier"),
        _ => false,
    }
}

/// Load the artifact at `location` (file or directory).
pub fn load_classifier(location: &Path) -> Result<(Arc<dyn Classifier>, PathBuf), ArtifactError> {
    let path = locate_artifact(location)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let model: Arc<dyn Classifier> = match ext.as_str() {
        "json" => Arc::new(LinearClassifier::load(&path)?),
        #[cfg(feature = "onnx-classifier")]
        "onnx" => Arc::new(super::onnx::OnnxClassifier::load(&path)?),
        other => return Err(ArtifactError::UnsupportedFormat(other.to_string())),
    };

    Ok((model, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_JSON: &str = r#"{
        "format": "linear_threshold",
        "feature_names": ["temperature_c"],
        "coefficients": [1.0],
        "intercept": -38.0,
        "threshold": 0.0
    }"#;

    #[test]
    fn missing_location_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_artifact(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            locate_artifact(dir.path()),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn pipeline_is_preferred_over_bare_model() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("classifier.json"), MODEL_JSON).unwrap();
        std::fs::write(dir.path().join("model_pipeline.json"), MODEL_JSON).unwrap();
        let found = locate_artifact(dir.path()).unwrap();
        assert!(found.ends_with("model_pipeline.json"));
    }

    #[test]
    fn bare_model_used_when_no_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("classifier.json"), MODEL_JSON).unwrap();
        let (model, path) = load_classifier(dir.path()).unwrap();
        assert!(path.ends_with("classifier.json"));
        assert_eq!(model.feature_count(), 1);
        assert_eq!(model.format(), "linear_threshold");
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, b"not a model").unwrap();
        assert!(matches!(
            load_classifier(&path),
            Err(ArtifactError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn corrupt_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_classifier(&path), Err(ArtifactError::Parse(_, _))));
    }
}
