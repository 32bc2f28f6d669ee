//! Domain errors for the compile worker.

use thiserror::Error;

use super::models::CompilerVariant;

/// Errors raised while serving build requests.
///
/// `MalformedRequest` and `CompileFault` are converted into response values
/// before they leave the worker loop. The rest stop it.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("{variant} compiler backend unavailable: {reason}")]
    BackendUnavailable {
        variant: CompilerVariant,
        reason: String,
    },

    #[error("Compiler fault: {0}")]
    CompileFault(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Worker has shut down")]
    ShutDown,
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl WorkerError {
    pub fn backend_unavailable(variant: CompilerVariant, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            variant,
            reason: reason.into(),
        }
    }

    /// Whether this error must stop the worker process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable { .. } | Self::Transport(_) | Self::ShutDown
        )
    }
}

impl From<std::io::Error> for WorkerError {
    fn from(err: std::io::Error) -> Self {
        WorkerError::Transport(err.to_string())
    }
}
