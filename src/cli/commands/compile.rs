//! Implementation of the `javac-worker compile` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{BuildRequest, BuildResponse, Config, ResponseStatus};
use crate::infrastructure::compilers::BackendRegistry;
use crate::services::{CompilerSelector, Worker};

#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Java source files to compile
    #[arg(required = true)]
    pub sources: Vec<String>,

    /// Target label (repeatable); `proto` marks generated code
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    /// Classpath entry (repeatable)
    #[arg(long = "classpath", visible_alias = "cp")]
    pub classpath: Vec<String>,

    /// Directory for generated class files
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Directory javac runs in
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// Rule name echoed in the response
    #[arg(short, long, default_value = "")]
    pub rule: String,
}

impl CompileArgs {
    pub fn to_request(&self) -> BuildRequest {
        let mut request = BuildRequest::new(self.sources.iter().cloned()).with_rule(self.rule.clone());
        for label in &self.labels {
            request = request.with_label(label.clone());
        }
        for entry in &self.classpath {
            request = request.with_classpath_entry(entry.clone());
        }
        if let Some(dir) = &self.output_dir {
            request = request.with_output_dir(dir.clone());
        }
        if let Some(dir) = &self.working_dir {
            request = request.with_working_dir(dir.clone());
        }
        request
    }
}

impl CommandOutput for BuildResponse {
    fn to_human(&self) -> String {
        let status = match self.status {
            ResponseStatus::Success => "Compilation succeeded",
            ResponseStatus::Failure => "Compilation failed",
            ResponseStatus::MalformedRequest => "Malformed request",
        };
        let mut lines = vec![match self.variant {
            Some(variant) => format!("{status} ({variant}, {} ms)", self.duration_ms),
            None => status.to_string(),
        }];
        lines.extend(self.messages.iter().cloned());
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run one request through a fresh worker and print the response.
pub async fn execute(args: CompileArgs, config: &Config, json_mode: bool) -> Result<()> {
    let registry = BackendRegistry::from_config(config)
        .context("Failed to initialise compiler backends")?;
    let mut worker = Worker::new(CompilerSelector::new(registry));

    let response = worker
        .handle(args.to_request())
        .await
        .context("Compilation aborted")?;
    output(&response, json_mode);

    if !response.success {
        bail!("Compilation did not succeed: {:?}", response.status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_request() {
        let args = CompileArgs {
            sources: vec!["A.java".into(), "B.java".into()],
            labels: vec!["proto".into()],
            classpath: vec!["lib/a.jar".into()],
            output_dir: Some(PathBuf::from("out")),
            working_dir: None,
            rule: "//pkg:lib".into(),
        };
        let request = args.to_request();
        assert_eq!(request.sources, vec!["A.java", "B.java"]);
        assert!(request.has_label("proto"));
        assert!(request.classpath.contains("lib/a.jar"));
        assert_eq!(request.output_dir, Some(PathBuf::from("out")));
        assert_eq!(request.rule, "//pkg:lib");
    }

    #[test]
    fn human_output_lists_messages() {
        let response = BuildResponse::malformed("//pkg:lib", "no sources");
        let text = response.to_human();
        assert!(text.starts_with("Malformed request"));
        assert!(text.contains("no sources"));
    }
}
