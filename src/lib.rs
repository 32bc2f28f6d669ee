//! javac-worker - persistent Java compile worker
//!
//! A long-lived process that receives build requests over a JSON-lines
//! channel and compiles each one with either plain `javac` (the baseline
//! variant) or `javac` with the Error Prone plugin (the augmented variant).
//! Targets labelled `proto` are generated code and always take the baseline
//! path.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): request/response models, errors and ports
//! - **Service Layer** (`services`): selection policy, compiler selection, worker loop
//! - **Infrastructure Layer** (`infrastructure`): compiler backends, transport, config, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use javac_worker::{BackendRegistry, CompilerSelector, ConfigLoader, Worker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None)?;
//!     let registry = BackendRegistry::from_config(&config)?;
//!     let mut worker = Worker::new(CompilerSelector::new(registry));
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     worker.serve(stdin, tokio::io::stdout(), std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AugmentationMode, BuildRequest, BuildResponse, CompileOutcome, CompilerVariant, Config,
    Diagnostic, ResponseStatus, Severity,
};
pub use domain::ports::{Compiler, CompilerBackend, CompilerFactory, SelectionPolicy};
pub use domain::{WorkerError, WorkerResult};
pub use infrastructure::compilers::{BackendRegistry, BaselineBackend, ErrorProneBackend};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{should_augment, CompilerSelector, GeneratedCodePolicy, Worker, WorkerState};
