//! Baseline backend: plain `javac`.

use super::command::{build_args, JavacCompiler};
use crate::domain::errors::WorkerResult;
use crate::domain::models::{BuildRequest, CompilerVariant, JavacConfig};
use crate::domain::ports::{Compiler, CompilerBackend};

/// Backend that runs the standard toolchain with no analysis plugin.
///
/// Needs nothing from the static-analysis engine, so it is always
/// constructible.
#[derive(Debug, Clone)]
pub struct BaselineBackend {
    javac: JavacConfig,
}

impl BaselineBackend {
    pub fn new(javac: JavacConfig) -> Self {
        Self { javac }
    }

    /// Build the compiler without boxing it.
    pub fn compiler_for(&self, request: &BuildRequest) -> JavacCompiler {
        let args = build_args(request, &self.javac.extra_opts, Vec::new());
        JavacCompiler::new(CompilerVariant::Baseline, &self.javac.program, args, request)
    }
}

impl CompilerBackend for BaselineBackend {
    fn variant(&self) -> CompilerVariant {
        CompilerVariant::Baseline
    }

    fn name(&self) -> &str {
        "javac"
    }

    fn new_compiler(&self, request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>> {
        Ok(Box::new(self.compiler_for(request)))
    }
}
