//! Per-request compiler construction.
//!
//! [`CompilerSelector`] is the single point where a request is turned into a
//! compiler: it asks the [`SelectionPolicy`] for a variant and constructs it
//! from the [`BackendRegistry`]. New backends plug in here; the worker loop
//! never changes.

use std::sync::Arc;

use crate::domain::errors::{WorkerError, WorkerResult};
use crate::domain::models::{AugmentationMode, BuildRequest, CompilerVariant};
use crate::domain::ports::{Compiler, CompilerBackend, CompilerFactory, SelectionPolicy};
use crate::infrastructure::compilers::BackendRegistry;
use crate::services::selection_policy::GeneratedCodePolicy;

/// Compiler factory that routes through a selection policy.
pub struct CompilerSelector<P = GeneratedCodePolicy> {
    policy: P,
    registry: BackendRegistry,
}

impl CompilerSelector<GeneratedCodePolicy> {
    /// Selector using the default generated-code policy.
    pub fn new(registry: BackendRegistry) -> Self {
        Self::with_policy(GeneratedCodePolicy, registry)
    }
}

impl<P: SelectionPolicy> CompilerSelector<P> {
    pub fn with_policy(policy: P, registry: BackendRegistry) -> Self {
        Self { policy, registry }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Resolve the backend for a request.
    ///
    /// The policy decides the requested variant. A missing augmented backend
    /// falls back to baseline only when the registry was built for optional
    /// or disabled augmentation.
    pub fn backend_for(&self, request: &BuildRequest) -> WorkerResult<Arc<dyn CompilerBackend>> {
        let requested = self.policy.select(request);

        if let Some(backend) = self.registry.get(requested) {
            return Ok(backend);
        }

        match (requested, self.registry.mode()) {
            (CompilerVariant::Augmented, AugmentationMode::Optional) => {
                tracing::warn!(
                    rule = %request.rule,
                    "Augmented backend unavailable; compiling with baseline only"
                );
                Ok(self.registry.baseline())
            }
            (CompilerVariant::Augmented, AugmentationMode::Disabled) => {
                tracing::debug!(rule = %request.rule, "Augmentation disabled; using baseline");
                Ok(self.registry.baseline())
            }
            (variant, _) => Err(WorkerError::backend_unavailable(
                variant,
                "no backend registered for this variant",
            )),
        }
    }
}

impl<P: SelectionPolicy> CompilerFactory for CompilerSelector<P> {
    fn new_compiler(&self, request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>> {
        let backend = self.backend_for(request)?;
        tracing::debug!(
            rule = %request.rule,
            backend = backend.name(),
            variant = %backend.variant(),
            "Selected compiler backend"
        );
        backend.new_compiler(request)
    }
}
