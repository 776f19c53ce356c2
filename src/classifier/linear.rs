//! JSON-serialised linear classifiers (logistic regression or a plain
//! weighted-sum threshold), optionally with a standard scaler in front.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::PredictionLabel;

use super::error::ArtifactError;
use super::Classifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearFormat {
    /// `sigmoid(z) >= threshold`.
    LogisticRegression,
    /// `z >= threshold`.
    LinearThreshold,
}

impl LinearFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LinearFormat::LogisticRegression => "logistic_regression",
            LinearFormat::LinearThreshold => "linear_threshold",
        }
    }
}

/// Per-feature standardisation applied before the weighted sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk artifact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub format: LinearFormat,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LinearArtifact {
    /// Check internal consistency. Feature names are not resolved here: a
    /// name the intake layer does not know is a prediction-time mismatch.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err(ArtifactError::Invalid("artifact has no coefficients".into()));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != n {
            return Err(ArtifactError::Invalid(format!(
                "{} feature names for {} coefficients",
                self.feature_names.len(),
                n
            )));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ArtifactError::Invalid(format!(
                    "scaler has {} means and {} scales for {} coefficients",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n
                )));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ArtifactError::Invalid("scaler contains a zero or non-finite scale".into()));
            }
        }
        let means = self.scaler.iter().flat_map(|s| s.mean.iter());
        let all_finite = self
            .coefficients
            .iter()
            .chain(means)
            .chain(std::iter::once(&self.intercept))
            .chain(std::iter::once(&self.threshold))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ArtifactError::Invalid("non-finite model parameter".into()));
        }
        Ok(())
    }
}

/// Loaded, validated linear model.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: LinearArtifact,
}

impl LinearClassifier {
    pub fn new(artifact: LinearArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ArtifactError> {
        let artifact: LinearArtifact = serde_json::from_str(json)
            .map_err(|e| ArtifactError::Parse(origin.to_string(), e.to_string()))?;
        Self::new(artifact)
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ArtifactError::Io(path.display().to_string(), e.to_string()))?;
        Self::from_json(&json, &path.display().to_string())
    }

    pub fn artifact(&self) -> &LinearArtifact {
        &self.artifact
    }

    /// Raw decision value (`z`) or probability, depending on format.
    pub fn score(&self, features: &[f64]) -> f64 {
        let a = &self.artifact;
        let z = a.intercept
            + features
                .iter()
                .enumerate()
                .map(|(i, x)| {
                    let x = match &a.scaler {
                        Some(s) => (x - s.mean[i]) / s.scale[i],
                        None => *x,
                    };
                    a.coefficients[i] * x
                })
                .sum::<f64>();
        match a.format {
            LinearFormat::LogisticRegression => 1.0 / (1.0 + (-z).exp()),
            LinearFormat::LinearThreshold => z,
        }
    }
}

impl Classifier for LinearClassifier {
    fn format(&self) -> &'static str {
        self.artifact.format.as_str()
    }

    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn feature_count(&self) -> usize {
        self.artifact.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<PredictionLabel, String> {
        if features.len() != self.feature_count() {
            return Err(format!(
                "expected {} values, got {}",
                self.feature_count(),
                features.len()
            ));
        }
        let score = self.score(features);
        if !score.is_finite() {
            return Err(format!("non-finite decision score ({score})"));
        }
        let label = if score >= self.artifact.threshold {
            PredictionLabel::Infected
        } else {
            PredictionLabel::NotInfected
        };
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_artifact() -> LinearArtifact {
        LinearArtifact {
            format: LinearFormat::LogisticRegression,
            feature_names: vec!["temperature_c".into(), "has_cough".into()],
            coefficients: vec![2.0, 1.5],
            intercept: -1.0,
            scaler: Some(StandardScaler {
                mean: vec![37.0, 0.0],
                scale: vec![1.0, 1.0],
            }),
            threshold: 0.5,
        }
    }

    #[test]
    fn fever_and_cough_predicts_infected() {
        let model = LinearClassifier::new(make_artifact()).unwrap();
        // z = -1 + 2*(39-37) + 1.5*1 = 4.5
        assert_eq!(model.predict(&[39.0, 1.0]).unwrap(), PredictionLabel::Infected);
        assert!(model.score(&[39.0, 1.0]) > 0.98);
    }

    #[test]
    fn normal_temperature_predicts_not_infected() {
        let model = LinearClassifier::new(make_artifact()).unwrap();
        // z = -1
        assert_eq!(model.predict(&[37.0, 0.0]).unwrap(), PredictionLabel::NotInfected);
    }

    #[test]
    fn linear_threshold_uses_raw_sum() {
        let mut artifact = make_artifact();
        artifact.format = LinearFormat::LinearThreshold;
        artifact.scaler = None;
        artifact.threshold = 0.0;
        let model = LinearClassifier::new(artifact).unwrap();
        // z = -1 + 2*0.2 + 1.5*0 = -0.6
        assert_eq!(model.predict(&[0.2, 0.0]).unwrap(), PredictionLabel::NotInfected);
        assert_eq!(model.predict(&[1.0, 0.0]).unwrap(), PredictionLabel::Infected);
    }

    #[test]
    fn wrong_length_vector_is_rejected() {
        let model = LinearClassifier::new(make_artifact()).unwrap();
        assert!(model.predict(&[39.0]).is_err());
    }

    #[test]
    fn mismatched_name_count_is_invalid() {
        let mut artifact = make_artifact();
        artifact.feature_names.push("pulse".into());
        assert!(matches!(
            LinearClassifier::new(artifact),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn zero_scale_is_invalid() {
        let mut artifact = make_artifact();
        artifact.scaler = Some(StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![0.0, 1.0],
        });
        assert!(LinearClassifier::new(artifact).is_err());
    }

    #[test]
    fn non_finite_scaler_mean_is_invalid() {
        let mut artifact = make_artifact();
        artifact.scaler = Some(StandardScaler {
            mean: vec![f64::NAN, 0.0],
            scale: vec![1.0, 1.0],
        });
        assert!(matches!(
            LinearClassifier::new(artifact),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn overflowing_score_is_an_error() {
        let mut artifact = make_artifact();
        artifact.coefficients = vec![1e307, -1e307];
        artifact.scaler = None;
        let model = LinearClassifier::new(artifact).unwrap();
        assert!(model.score(&[170.0, 70.0]).is_nan());
        let err = model.predict(&[170.0, 70.0]).unwrap_err();
        assert!(err.contains("non-finite"));
    }

    #[test]
    fn parses_json_with_default_threshold() {
        let json = r#"{
            "format": "logistic_regression",
            "feature_names": ["o2s"],
            "coefficients": [-0.5],
            "intercept": 48.0
        }"#;
        let model = LinearClassifier::from_json(json, "inline").unwrap();
        assert_eq!(model.artifact().threshold, 0.5);
        assert_eq!(model.feature_count(), 1);
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let json = r#"{"format": "xgboost", "feature_names": [], "coefficients": [1.0], "intercept": 0.0}"#;
        assert!(matches!(
            LinearClassifier::from_json(json, "inline"),
            Err(ArtifactError::Parse(_, _))
        ));
    }
}
