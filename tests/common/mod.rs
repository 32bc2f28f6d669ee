//! Common test utilities for integration tests
//!
//! Provides scripted compiler backends and helpers shared across the
//! integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use javac_worker::domain::models::{
    AugmentationMode, BuildRequest, BuildResponse, CompileOutcome, CompilerVariant, Diagnostic,
    Severity,
};
use javac_worker::domain::ports::{Compiler, CompilerBackend};
use javac_worker::{BackendRegistry, WorkerError, WorkerResult};

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// What a scripted compiler does for one request.
#[derive(Debug, Clone)]
pub enum Behaviour {
    Succeed,
    /// Compile error with one rendered message.
    Fail(String),
    /// Backend fault returned as an error value.
    Fault,
    /// Backend fault raised as a panic.
    Panic,
    /// The backend cannot construct a compiler at all.
    Unavailable,
}

/// Backend whose behaviour is scripted per request.
///
/// Behaviours are consumed in order; once the script runs out every request
/// succeeds.
#[derive(Clone)]
pub struct ScriptedBackend {
    variant: CompilerVariant,
    script: Arc<Mutex<VecDeque<Behaviour>>>,
    compiles: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(variant: CompilerVariant) -> Self {
        Self {
            variant,
            script: Arc::new(Mutex::new(VecDeque::new())),
            compiles: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn then(self, behaviour: Behaviour) -> Self {
        self.script.lock().unwrap().push_back(behaviour);
        self
    }

    /// Number of compilers this backend has run.
    pub fn compiles(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }
}

impl CompilerBackend for ScriptedBackend {
    fn variant(&self) -> CompilerVariant {
        self.variant
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn new_compiler(&self, _request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>> {
        let behaviour = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Behaviour::Succeed);

        if matches!(behaviour, Behaviour::Unavailable) {
            return Err(WorkerError::backend_unavailable(self.variant, "scripted outage"));
        }

        Ok(Box::new(ScriptedCompiler {
            variant: self.variant,
            behaviour,
            compiles: Arc::clone(&self.compiles),
        }))
    }
}

struct ScriptedCompiler {
    variant: CompilerVariant,
    behaviour: Behaviour,
    compiles: Arc<AtomicUsize>,
}

#[async_trait]
impl Compiler for ScriptedCompiler {
    fn variant(&self) -> CompilerVariant {
        self.variant
    }

    async fn compile(&mut self) -> WorkerResult<CompileOutcome> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Succeed => Ok(CompileOutcome::Success {
                diagnostics: vec![],
            }),
            Behaviour::Fail(message) => Ok(CompileOutcome::Failure {
                diagnostics: vec![Diagnostic::plain(Severity::Error, message.clone())],
            }),
            Behaviour::Fault => Err(WorkerError::CompileFault("scripted fault".to_string())),
            Behaviour::Panic => panic!("scripted panic"),
            Behaviour::Unavailable => unreachable!("rejected at construction"),
        }
    }
}

/// Registry with the given baseline and, optionally, augmented backends.
pub fn registry(
    mode: AugmentationMode,
    baseline: &ScriptedBackend,
    augmented: Option<&ScriptedBackend>,
) -> BackendRegistry {
    let mut registry = BackendRegistry::new(Arc::new(baseline.clone()), mode);
    if let Some(augmented) = augmented {
        registry.register(Arc::new(augmented.clone()));
    }
    registry
}

/// Encode requests as the JSON-lines input stream.
pub fn input_lines(requests: &[BuildRequest]) -> String {
    requests
        .iter()
        .map(|r| serde_json::to_string(r).unwrap() + "\n")
        .collect()
}

/// Decode every response record written to the output stream.
pub fn output_records(output: &[u8]) -> Vec<BuildResponse> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
