//! Domain models for the compile worker.

pub mod build_request;
pub mod compile;
pub mod config;

pub use build_request::BuildRequest;
pub use compile::{
    BuildResponse, CompileOutcome, CompilerVariant, Diagnostic, ResponseStatus, Severity,
};
pub use config::{
    AugmentationMode, Config, ErrorProneConfig, JavacConfig, LoggingConfig, WorkerConfig,
};
