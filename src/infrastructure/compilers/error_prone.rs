//! Augmented backend: `javac` with the Error Prone plugin.
//!
//! The plugin is loaded through `-Xplugin:ErrorProne` from a configured
//! processor path. The backend can only be built when every jar on that path
//! exists; there is no silent fallback to plain `javac` from here.

use std::path::PathBuf;

use super::command::{build_args, join_classpath, JavacCompiler};
use crate::domain::errors::{WorkerError, WorkerResult};
use crate::domain::models::{BuildRequest, CompilerVariant, ErrorProneConfig, JavacConfig};
use crate::domain::ports::{Compiler, CompilerBackend};

/// Backend that layers Error Prone on top of `javac`.
#[derive(Debug, Clone)]
pub struct ErrorProneBackend {
    javac: JavacConfig,
    error_prone: ErrorProneConfig,
}

impl ErrorProneBackend {
    /// Check the plugin is present and build the backend.
    pub fn probe(javac: JavacConfig, error_prone: ErrorProneConfig) -> WorkerResult<Self> {
        check_processor_path(&error_prone.processor_path)?;
        Ok(Self { javac, error_prone })
    }

    /// Flags that load and configure the plugin.
    pub fn plugin_args(&self) -> Vec<String> {
        let mut args = self.error_prone.jvm_flags.clone();
        args.push("-XDcompilePolicy=simple".to_string());
        args.push("--should-stop=ifError=FLOW".to_string());
        args.push("-processorpath".to_string());
        args.push(join_classpath(
            self.error_prone
                .processor_path
                .iter()
                .map(|p| p.display().to_string()),
        ));

        let mut plugin = String::from("-Xplugin:ErrorProne");
        for flag in &self.error_prone.flags {
            plugin.push(' ');
            plugin.push_str(flag);
        }
        args.push(plugin);
        args
    }

    /// Build the compiler without boxing it.
    pub fn compiler_for(&self, request: &BuildRequest) -> JavacCompiler {
        let args = build_args(request, &self.javac.extra_opts, self.plugin_args());
        JavacCompiler::new(CompilerVariant::Augmented, &self.javac.program, args, request)
    }
}

impl CompilerBackend for ErrorProneBackend {
    fn variant(&self) -> CompilerVariant {
        CompilerVariant::Augmented
    }

    fn name(&self) -> &str {
        "error-prone"
    }

    fn new_compiler(&self, request: &BuildRequest) -> WorkerResult<Box<dyn Compiler>> {
        check_processor_path(&self.error_prone.processor_path)?;
        Ok(Box::new(self.compiler_for(request)))
    }
}

fn check_processor_path(processor_path: &[PathBuf]) -> WorkerResult<()> {
    if processor_path.is_empty() {
        return Err(WorkerError::backend_unavailable(
            CompilerVariant::Augmented,
            "no Error Prone processor path configured",
        ));
    }

    if let Some(missing) = processor_path.iter().find(|p| !p.exists()) {
        return Err(WorkerError::backend_unavailable(
            CompilerVariant::Augmented,
            format!("Error Prone jar {} does not exist", missing.display()),
        ));
    }

    Ok(())
}
