//! Implementation of the `javac-worker serve` command.

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::BufReader;

use crate::domain::models::Config;
use crate::infrastructure::compilers::BackendRegistry;
use crate::services::{CompilerSelector, Worker};

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {}

/// Probe backends, then serve requests from stdin until input ends or the
/// process is signalled.
pub async fn execute(_args: ServeArgs, config: &Config) -> Result<()> {
    let registry = BackendRegistry::from_config(config)
        .context("Failed to initialise compiler backends")?;

    tracing::info!(
        augmentation = config.worker.augmentation.as_str(),
        variants = ?registry.available_variants(),
        degraded = registry.is_degraded(),
        "Compiler backends ready"
    );

    let mut worker = Worker::new(CompilerSelector::new(registry));
    let stats = worker
        .serve(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown_signal(),
        )
        .await
        .context("Worker loop terminated")?;

    tracing::debug!(requests = stats.requests, "Serve finished");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down after the current request");
        }
        () = terminate => {
            tracing::info!("Received terminate signal, shutting down after the current request");
        }
    }
}
