use crate::domain::models::{BuildRequest, CompilerVariant};

/// Port deciding whether a request gets static analysis.
///
/// Implementations must be pure and total: the same request always yields
/// the same answer, and every label set (including the empty one) is valid.
pub trait SelectionPolicy: Send + Sync {
    /// Whether the request should be compiled with the augmented backend.
    fn should_augment(&self, request: &BuildRequest) -> bool;

    /// The variant this policy picks for the request.
    fn select(&self, request: &BuildRequest) -> CompilerVariant {
        if self.should_augment(request) {
            CompilerVariant::Augmented
        } else {
            CompilerVariant::Baseline
        }
    }
}
