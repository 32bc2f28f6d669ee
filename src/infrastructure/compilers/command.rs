//! `javac` process invocation shared by both backends.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::diagnostics::parse_javac_output;
use crate::domain::errors::{WorkerError, WorkerResult};
use crate::domain::models::{BuildRequest, CompileOutcome, CompilerVariant, Diagnostic, Severity};
use crate::domain::ports::Compiler;

#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const CLASSPATH_SEPARATOR: &str = ":";

/// Join path-like entries with the platform classpath separator.
pub fn join_classpath<I, S>(entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEPARATOR)
}

/// Arguments common to every invocation: output, classpath, options, sources.
///
/// `leading` is inserted before everything else; the augmented backend uses
/// it for the plugin flags.
pub fn build_args(request: &BuildRequest, extra_opts: &[String], leading: Vec<String>) -> Vec<String> {
    let mut args = leading;

    if let Some(output_dir) = &request.output_dir {
        args.push("-d".to_string());
        args.push(output_dir.display().to_string());
    }

    if !request.classpath.is_empty() {
        args.push("-cp".to_string());
        args.push(join_classpath(&request.classpath));
    }

    args.extend(extra_opts.iter().cloned());
    args.extend(request.opts.iter().cloned());
    args.extend(request.sources.iter().cloned());
    args
}

/// A `javac` run bound to one request.
#[derive(Debug, Clone)]
pub struct JavacCompiler {
    variant: CompilerVariant,
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl JavacCompiler {
    pub fn new(
        variant: CompilerVariant,
        program: impl Into<String>,
        args: Vec<String>,
        request: &BuildRequest,
    ) -> Self {
        Self {
            variant,
            program: program.into(),
            args,
            working_dir: request.working_dir.clone(),
            output_dir: request.output_dir.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl Compiler for JavacCompiler {
    fn variant(&self) -> CompilerVariant {
        self.variant
    }

    async fn compile(&mut self) -> WorkerResult<CompileOutcome> {
        if let Some(output_dir) = &self.output_dir {
            let output_dir = self.resolve(output_dir);
            tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
                WorkerError::CompileFault(format!(
                    "Failed to create output directory {}: {}",
                    output_dir.display(),
                    e
                ))
            })?;
        }

        tracing::debug!(
            variant = %self.variant,
            program = %self.program,
            arg_count = self.args.len(),
            "Launching compiler"
        );

        let mut command = Command::new(&self.program);
        // stdin belongs to the request stream.
        command.args(&self.args).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|e| {
            tracing::error!(
                variant = %self.variant,
                program = %self.program,
                error = %e,
                "Failed to spawn compiler"
            );
            WorkerError::CompileFault(format!("Failed to spawn {}: {}", self.program, e))
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        let mut diagnostics = parse_javac_output(&stderr);
        diagnostics.extend(parse_javac_output(&stdout));

        if output.status.success() {
            return Ok(CompileOutcome::Success { diagnostics });
        }

        if diagnostics.is_empty() {
            let raw = stderr.trim();
            let text = if raw.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                raw.to_string()
            };
            diagnostics.push(Diagnostic::plain(Severity::Error, text));
        }

        Ok(CompileOutcome::Failure { diagnostics })
    }
}
