//! Backend Registry
//!
//! The variant table: which compiler backend serves each [`CompilerVariant`].
//! Built once at startup, where the availability of the augmented backend is
//! decided for the lifetime of the process.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{BaselineBackend, ErrorProneBackend};
use crate::domain::errors::WorkerResult;
use crate::domain::models::{AugmentationMode, CompilerVariant, Config};
use crate::domain::ports::CompilerBackend;

/// Registry of loaded compiler backends.
///
/// The baseline backend is always present.
pub struct BackendRegistry {
    baseline: Arc<dyn CompilerBackend>,
    backends: BTreeMap<CompilerVariant, Arc<dyn CompilerBackend>>,
    mode: AugmentationMode,
}

impl BackendRegistry {
    /// Create a registry holding only the given baseline backend.
    pub fn new(baseline: Arc<dyn CompilerBackend>, mode: AugmentationMode) -> Self {
        let mut backends = BTreeMap::new();
        backends.insert(CompilerVariant::Baseline, Arc::clone(&baseline));
        Self {
            baseline,
            backends,
            mode,
        }
    }

    /// Create the registry from configuration.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if augmentation is required and the
    /// Error Prone plugin cannot be found.
    pub fn from_config(config: &Config) -> WorkerResult<Self> {
        let mode = config.worker.augmentation;
        let baseline = Arc::new(BaselineBackend::new(config.javac.clone())) as Arc<dyn CompilerBackend>;
        let mut registry = Self::new(baseline, mode);

        if mode == AugmentationMode::Disabled {
            tracing::info!("Augmented compilation disabled; running baseline only");
            return Ok(registry);
        }

        match ErrorProneBackend::probe(config.javac.clone(), config.error_prone.clone()) {
            Ok(backend) => {
                tracing::info!(
                    jars = config.error_prone.processor_path.len(),
                    "Error Prone backend available"
                );
                registry.register(Arc::new(backend));
            }
            Err(e) if mode == AugmentationMode::Optional => {
                tracing::error!(
                    error = %e,
                    "Augmented compilation requested but unavailable; \
                     every request will be compiled WITHOUT static analysis"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Augmented compilation required but unavailable");
                return Err(e);
            }
        }

        Ok(registry)
    }

    /// Register (or replace) the backend for its variant.
    pub fn register(&mut self, backend: Arc<dyn CompilerBackend>) {
        if backend.variant() == CompilerVariant::Baseline {
            self.baseline = Arc::clone(&backend);
        }
        self.backends.insert(backend.variant(), backend);
    }

    /// Backend for a variant, if loaded.
    pub fn get(&self, variant: CompilerVariant) -> Option<Arc<dyn CompilerBackend>> {
        self.backends.get(&variant).map(Arc::clone)
    }

    /// The baseline backend.
    pub fn baseline(&self) -> Arc<dyn CompilerBackend> {
        Arc::clone(&self.baseline)
    }

    /// Whether a backend for the variant is loaded.
    pub fn is_available(&self, variant: CompilerVariant) -> bool {
        self.backends.contains_key(&variant)
    }

    /// Loaded variants, in order.
    pub fn available_variants(&self) -> Vec<CompilerVariant> {
        self.backends.keys().copied().collect()
    }

    /// The augmentation mode the registry was built for.
    pub fn mode(&self) -> AugmentationMode {
        self.mode
    }

    /// True when augmentation was wanted but the backend is missing.
    pub fn is_degraded(&self) -> bool {
        self.mode == AugmentationMode::Optional && !self.is_available(CompilerVariant::Augmented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::WorkerError;

    fn config(mode: AugmentationMode, jars: Vec<std::path::PathBuf>) -> Config {
        let mut config = Config::default();
        config.worker.augmentation = mode;
        config.error_prone.processor_path = jars;
        config
    }

    #[test]
    fn required_without_plugin_fails() {
        let result = BackendRegistry::from_config(&config(AugmentationMode::Required, vec![]));
        assert!(matches!(
            result,
            Err(WorkerError::BackendUnavailable { .. })
        ));
    }

    #[test]
    fn optional_without_plugin_degrades() {
        let registry =
            BackendRegistry::from_config(&config(AugmentationMode::Optional, vec![])).unwrap();
        assert_eq!(registry.available_variants(), vec![CompilerVariant::Baseline]);
        assert!(registry.is_degraded());
    }

    #[test]
    fn disabled_never_loads_plugin() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("ep.jar");
        std::fs::write(&jar, b"").unwrap();

        let registry =
            BackendRegistry::from_config(&config(AugmentationMode::Disabled, vec![jar])).unwrap();
        assert!(!registry.is_available(CompilerVariant::Augmented));
        assert!(!registry.is_degraded());
    }

    #[test]
    fn required_with_plugin_loads_both() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("ep.jar");
        std::fs::write(&jar, b"").unwrap();

        let registry =
            BackendRegistry::from_config(&config(AugmentationMode::Required, vec![jar])).unwrap();
        assert_eq!(
            registry.available_variants(),
            vec![CompilerVariant::Baseline, CompilerVariant::Augmented]
        );
        assert_eq!(registry.baseline().name(), "javac");
        assert_eq!(registry.get(CompilerVariant::Augmented).unwrap().name(), "error-prone");
    }
}
