//! Process-lifetime memoisation of the classifier load.
//!
//! The first request touches the filesystem; every later request reuses the
//! cached outcome, including a "model unavailable" result. After that the
//! handle is read-only and safe to share across sessions.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::ScreeningConfig;

use super::adapter::ClassifierAdapter;
use super::error::ClassifierError;

pub struct ModelCache {
    location: PathBuf,
    allow_zero_fill: bool,
    slot: OnceLock<Result<Arc<ClassifierAdapter>, ClassifierError>>,
}

impl ModelCache {
    pub fn new(location: impl Into<PathBuf>, allow_zero_fill: bool) -> Self {
        Self {
            location: location.into(),
            allow_zero_fill,
            slot: OnceLock::new(),
        }
    }

    pub fn from_config(config: &ScreeningConfig) -> Self {
        Self::new(config.artifact_path.clone(), config.allow_zero_fill)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The cached adapter, loading it on first use.
    pub fn get(&self) -> Result<Arc<ClassifierAdapter>, ClassifierError> {
        self.slot
            .get_or_init(|| {
                ClassifierAdapter::load(&self.location, self.allow_zero_fill).map(Arc::new)
            })
            .clone()
    }

    /// Whether a load has been attempted (successful or not).
    pub fn is_initialised(&self) -> bool {
        self.slot.get().is_some()
    }
}

static SHARED: OnceLock<ModelCache> = OnceLock::new();

/// Process-wide cache. The configuration from the first call wins; later
/// calls get the same cache regardless of their argument.
pub fn shared_cache(config: &ScreeningConfig) -> &'static ModelCache {
    SHARED.get_or_init(|| ModelCache::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_JSON: &str = r#"{
        "format": "linear_threshold",
        "feature_names": [],
        "coefficients": [0,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
        "intercept": -38.0,
        "threshold": 0.0
    }"#;

    #[test]
    fn load_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModelCache::new(dir.path().join("classifier.json"), false);
        assert!(!cache.is_initialised());
        let _ = cache.get();
        assert!(cache.is_initialised());
    }

    #[test]
    fn unavailable_outcome_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        let cache = ModelCache::new(&path, false);

        assert!(cache.get().unwrap_err().is_model_unavailable());

        // The artifact appearing later is not picked up until restart.
        std::fs::write(&path, MODEL_JSON).unwrap();
        assert!(cache.get().unwrap_err().is_model_unavailable());
    }

    #[test]
    fn successful_load_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, MODEL_JSON).unwrap();
        let cache = ModelCache::new(&path, false);

        let first = cache.get().unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn shared_cache_keeps_first_configuration() {
        let first = ScreeningConfig {
            artifact_path: PathBuf::from("/srv/fluscreen/first"),
            ..ScreeningConfig::default()
        };
        let second = ScreeningConfig {
            artifact_path: PathBuf::from("/srv/fluscreen/second"),
            allow_zero_fill: true,
            ..ScreeningConfig::default()
        };
        let a = shared_cache(&first);
        let b = shared_cache(&second);
        assert!(std::ptr::eq(a, b));
        assert_eq!(b.location(), Path::new("/srv/fluscreen/first"));
    }

    #[test]
    fn concurrent_readers_see_one_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, MODEL_JSON).unwrap();
        let cache = Arc::new(ModelCache::new(&path, false));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get().map(|a| Arc::as_ptr(&a) as usize))
            })
            .collect();
        let ptrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
    }
}
