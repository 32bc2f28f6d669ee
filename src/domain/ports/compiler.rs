//! Compiler capability ports.
//!
//! A [`CompilerBackend`] is loaded once at startup and stamps out one
//! [`Compiler`] per build request. A [`CompilerFactory`] hides which backend
//! is picked, so the worker loop only ever sees `new_compiler` and `compile`.

use async_trait::async_trait;

use crate::domain::errors::WorkerResult;
use crate::domain::models::{BuildRequest, CompileOutcome, CompilerVariant};

/// A compiler bound to a single build request.
///
/// # Examples
///
/// ```no_run
/// use javac_worker::domain::ports::Compiler;
///
/// async fn run(mut compiler: Box<dyn Compiler>) {
///     match compiler.compile().await {
///         Ok(outcome) => println!("success: {}", outcome.is_success()),
///         Err(e) => eprintln!("fault: {e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait Compiler: Send {
    /// Which variant this compiler belongs to.
    fn variant(&self) -> CompilerVariant;

    /// Compile the bound request.
    ///
    /// A failed compilation is `Ok(CompileOutcome::Failure { .. })`. `Err` is
    /// reserved for faults in the backend itself (e.g. the compiler could
    /// not be launched).
    async fn compile(&mut self) -> WorkerResult<CompileOutcome>;
}

/// A loaded compiler backend.
pub trait CompilerBackend: Send + Sync {
    /// Variant this backend implements.
    fn variant(&self) -> CompilerVariant;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Create a compiler for the given request.
    ///
    /// Fails with [`WorkerError::BackendUnavailable`](crate::domain::errors::WorkerError::BackendUnavailable)
    /// when the backend cannot run at all.
    fn new_compiler(&self, request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>>;
}

/// Chooses and constructs the compiler for a request.
pub trait CompilerFactory: Send + Sync {
    fn new_compiler(&self, request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>>;
}
