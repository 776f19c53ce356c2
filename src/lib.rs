pub mod advice; // Tiered clinical advice engine
pub mod classifier; // Model loading + strict prediction
pub mod config;
pub mod intake; // Form stages -> feature row
pub mod models;
pub mod session; // Controller contract

use tracing_subscriber::EnvFilter;

pub use advice::{evaluate, MEDICAL_DISCLAIMER, NO_RECOMMENDATIONS_MESSAGE};
pub use classifier::{ClassifierAdapter, ClassifierError, ModelCache, PredictionError};
pub use config::ScreeningConfig;
pub use intake::{assemble, week_of_season, Assembly, FieldValue, StageFields};
pub use models::{AdvisoryRecord, FeatureField, FeatureRow, PredictionLabel, Severity};
pub use session::{run_screening, run_screening_cached, ScreeningOutcome, SessionState, Stage};

/// Install the global tracing subscriber. A second call is a no-op.
pub fn init_tracing() {
    init_tracing_with(config::default_log_filter());
}

/// As [`init_tracing`], falling back to the configured `log_filter`.
pub fn init_tracing_from(config: &ScreeningConfig) {
    init_tracing_with(&config.log_filter);
}

/// As [`init_tracing`], with an explicit fallback filter for when `RUST_LOG`
/// is unset.
pub fn init_tracing_with(fallback_filter: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{} ready", config::APP_NAME, config::APP_VERSION);
    }
}
