//! javac-worker entry point.

use clap::Parser;

use javac_worker::cli::{self, Cli, EXIT_SUCCESS};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let code = match cli::run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => cli::handle_error(&err, json_mode),
    };

    std::process::exit(code);
}
