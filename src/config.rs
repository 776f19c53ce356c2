use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "FluScreen";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the classifier artifact location.
pub const ENV_MODEL_PATH: &str = "FLUSCREEN_MODEL_PATH";
/// Environment variable enabling the zero-fill escape hatch (`1`/`true`).
pub const ENV_ALLOW_ZERO_FILL: &str = "FLUSCREEN_ALLOW_ZERO_FILL";

/// Get the application data directory
/// ~/FluScreen/ on all platforms. Falls back to the working directory when
/// no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the models directory
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Default classifier artifact location (a directory searched for known
/// artifact file names).
pub fn default_artifact_path() -> PathBuf {
    models_dir()
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "fluscreen=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Read(String, String),

    #[error("Failed to parse config {0}: {1}")]
    Parse(String, String),
}

/// Runtime configuration of the screening core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// File or directory holding the classifier artifact.
    pub artifact_path: PathBuf,
    /// Permit the unsafe zero-fill prediction path.
    pub allow_zero_fill: bool,
    /// Fallback `EnvFilter` directives when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
            allow_zero_fill: false,
            log_filter: default_log_filter().to_string(),
        }
    }
}

impl ScreeningConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Apply `FLUSCREEN_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_MODEL_PATH).ok(),
            std::env::var(ENV_ALLOW_ZERO_FILL).ok(),
        )
    }

    fn with_overrides(mut self, model_path: Option<String>, zero_fill: Option<String>) -> Self {
        if let Some(path) = model_path.filter(|p| !p.trim().is_empty()) {
            self.artifact_path = PathBuf::from(path);
        }
        if let Some(flag) = zero_fill {
            self.allow_zero_fill = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_named_after_app() {
        assert!(app_data_dir().ends_with("FluScreen"));
    }

    #[test]
    fn models_dir_under_app_data() {
        let models = models_dir();
        assert!(models.starts_with(app_data_dir()));
        assert!(models.ends_with("models"));
    }

    #[test]
    fn default_config_is_strict() {
        let config = ScreeningConfig::default();
        assert!(!config.allow_zero_fill);
        assert_eq!(config.artifact_path, default_artifact_path());
        assert_eq!(config.log_filter, "fluscreen=info");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn json_file_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fluscreen.json");
        std::fs::write(&path, r#"{"artifact_path": "/srv/models/flu.json"}"#).unwrap();
        let config = ScreeningConfig::from_json_file(&path).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("/srv/models/flu.json"));
        assert!(!config.allow_zero_fill);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fluscreen.json");
        std::fs::write(&path, "allow_zero_fill = true").unwrap();
        assert!(matches!(
            ScreeningConfig::from_json_file(&path),
            Err(ConfigError::Parse(_, _))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ScreeningConfig::from_json_file(&dir.path().join("absent.json")),
            Err(ConfigError::Read(_, _))
        ));
    }

    #[test]
    fn overrides_apply() {
        let config = ScreeningConfig::default()
            .with_overrides(Some("/tmp/model.json".into()), Some("TRUE".into()));
        assert_eq!(config.artifact_path, PathBuf::from("/tmp/model.json"));
        assert!(config.allow_zero_fill);
    }

    #[test]
    fn blank_path_override_is_ignored() {
        let config = ScreeningConfig::default().with_overrides(Some("  ".into()), Some("0".into()));
        assert_eq!(config.artifact_path, default_artifact_path());
        assert!(!config.allow_zero_fill);
    }
}
