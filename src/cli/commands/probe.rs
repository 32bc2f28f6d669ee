//! Implementation of the `javac-worker probe` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::WorkerError;
use crate::domain::models::{AugmentationMode, CompilerVariant, Config};
use crate::infrastructure::compilers::ErrorProneBackend;

#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {}

#[derive(Debug, Serialize)]
pub struct BackendStatus {
    pub variant: CompilerVariant,
    pub program: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProbeOutput {
    pub augmentation: AugmentationMode,
    pub backends: Vec<BackendStatus>,
    /// Whether `serve` would start with this configuration.
    pub ready: bool,
    /// Serving, but without the augmented backend it was asked for.
    pub degraded: bool,
}

impl ProbeOutput {
    pub fn from_config(config: &Config) -> Self {
        let mode = config.worker.augmentation;

        let augmented = match mode {
            AugmentationMode::Disabled => BackendStatus {
                variant: CompilerVariant::Augmented,
                program: config.javac.program.clone(),
                available: false,
                reason: Some("disabled by configuration".to_string()),
            },
            _ => {
                let probed =
                    ErrorProneBackend::probe(config.javac.clone(), config.error_prone.clone());
                BackendStatus {
                    variant: CompilerVariant::Augmented,
                    program: config.javac.program.clone(),
                    available: probed.is_ok(),
                    reason: probed.err().map(|e| e.to_string()),
                }
            }
        };

        let augmented_available = augmented.available;
        Self {
            augmentation: mode,
            backends: vec![
                BackendStatus {
                    variant: CompilerVariant::Baseline,
                    program: config.javac.program.clone(),
                    available: true,
                    reason: None,
                },
                augmented,
            ],
            ready: mode != AugmentationMode::Required || augmented_available,
            degraded: mode == AugmentationMode::Optional && !augmented_available,
        }
    }
}

impl CommandOutput for ProbeOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Augmentation mode: {}", self.augmentation.as_str())];
        for backend in &self.backends {
            let state = if backend.available { "available" } else { "unavailable" };
            match &backend.reason {
                Some(reason) => lines.push(format!("  {:<9} {state} ({reason})", backend.variant)),
                None => lines.push(format!("  {:<9} {state}", backend.variant)),
            }
        }
        if self.degraded {
            lines.push("WARNING: augmented compilation is unavailable; serving baseline only".to_string());
        }
        lines.push(format!("Ready: {}", if self.ready { "yes" } else { "no" }));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print backend availability; fails like `serve` would when not ready.
pub async fn execute(_args: ProbeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let report = ProbeOutput::from_config(config);
    output(&report, json_mode);

    if !report.ready {
        let reason = report
            .backends
            .iter()
            .find(|b| b.variant == CompilerVariant::Augmented)
            .and_then(|b| b.reason.clone())
            .unwrap_or_default();
        return Err(WorkerError::backend_unavailable(CompilerVariant::Augmented, reason).into());
    }
    Ok(())
}
