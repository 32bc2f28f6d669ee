//! Service layer: selection policy, compiler selection and the worker loop.

pub mod compiler_selector;
pub mod selection_policy;
pub mod worker;

pub use compiler_selector::CompilerSelector;
pub use selection_policy::{should_augment, GeneratedCodePolicy, GENERATED_CODE_LABEL};
pub use worker::{Worker, WorkerState, WorkerStats};
