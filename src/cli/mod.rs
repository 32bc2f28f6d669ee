//! Command-line interface.
//!
//! Parses arguments, loads configuration, installs logging and dispatches to
//! a subcommand. Failures are mapped to process exit statuses here.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::{Context, Result};

pub use types::{Cli, Commands};

use crate::domain::errors::WorkerError;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Clean shutdown.
pub const EXIT_SUCCESS: i32 = 0;
/// Any failure other than a startup failure.
pub const EXIT_FAILURE: i32 = 1;
/// A compiler backend the configuration requires could not be initialised.
pub const EXIT_STARTUP_FAILURE: i32 = 3;

/// Run the parsed command line to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let log_config =
        LogConfig::from_settings(&config.logging).context("Invalid logging configuration")?;
    let _logger = LoggerImpl::init(&log_config).context("Failed to initialise logging")?;

    match cli.command() {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Compile(args) => commands::compile::execute(args, &config, cli.json).await,
        Commands::Probe(args) => commands::probe::execute(args, &config, cli.json).await,
    }
}

/// Exit status for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let startup_failure = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<WorkerError>(),
            Some(WorkerError::BackendUnavailable { .. })
        )
    });
    if startup_failure {
        EXIT_STARTUP_FAILURE
    } else {
        EXIT_FAILURE
    }
}

/// Report an error on stderr and return the exit status to use.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> i32 {
    let code = exit_code(err);
    if json_mode {
        let body = serde_json::json!({
            "error": format!("{err:#}"),
            "exit_code": code,
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    code
}
