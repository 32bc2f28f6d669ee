//! Baseline vs augmented routing.
//!
//! Generated code often fails stricter static checks for reasons its authors
//! cannot fix, and analysing it produces nothing actionable. Units are not
//! yet reliably marked as generated, so the `"proto"` label stands in for
//! that signal until they are.

use crate::domain::models::BuildRequest;
use crate::domain::ports::SelectionPolicy;

/// Label the build system attaches to generated protobuf code.
pub const GENERATED_CODE_LABEL: &str = "proto";

/// Returns true if the request should be checked by the augmented backend.
pub fn should_augment(request: &BuildRequest) -> bool {
    !request.has_label(GENERATED_CODE_LABEL)
}

/// Default policy: augment everything except generated code.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedCodePolicy;

impl SelectionPolicy for GeneratedCodePolicy {
    fn should_augment(&self, request: &BuildRequest) -> bool {
        should_augment(request)
    }
}
