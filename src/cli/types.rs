//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{compile::CompileArgs, probe::ProbeArgs, serve::ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "javac-worker")]
#[command(about = "Persistent Java compile worker with optional Error Prone augmentation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (defaults to ./javac-worker.yaml when present)
    #[arg(short, long, global = true, env = "JAVAC_WORKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

impl Cli {
    /// The subcommand to run; `serve` when none was given.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve JSON-lines build requests on stdin until input ends
    Serve(ServeArgs),

    /// Compile a single target and print the response
    Compile(CompileArgs),

    /// Report compiler backend availability
    Probe(ProbeArgs),
}
