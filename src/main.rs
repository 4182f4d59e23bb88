//! Egg Timer - time boiled, poached, fried and scrambled eggs
//!
//! This is the main entry point for the egg-timer application.

use std::process::ExitCode;
use tracing::debug;

use egg_timer::{
    cli,
    config::{Command, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();

    // Logs go to stderr so they never mix with the timer display
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting egg-timer v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match config.command {
        Command::List { json } => cli::list(json)?,
        Command::Show { method, json } => cli::show(&method, json)?,
        Command::Run(args) => cli::run(args).await?,
    };

    Ok(outcome.into())
}
