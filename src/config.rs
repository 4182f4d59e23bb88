//! Configuration and CLI argument handling

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "egg-timer")]
#[command(about = "Time boiled, poached, fried and scrambled eggs")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all cooking methods
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the options and tips of one method
    Show {
        /// Method key, e.g. "boiled"
        method: String,

        /// Print the method as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the timer for a method
    Run(RunArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Method key, e.g. "boiled"
    pub method: String,

    /// Option number to select (1-based)
    #[arg(short, long, default_value = "1")]
    pub option: usize,

    /// Start counting down immediately
    #[arg(short, long)]
    pub start: bool,

    /// Begin with the completion sound turned off
    #[arg(short, long)]
    pub mute: bool,

    /// Command to play the completion sound instead of the terminal bell
    #[arg(long, value_name = "CMD")]
    pub sound_command: Option<String>,

    /// Print timer updates as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Log filter: `RUST_LOG` when set, otherwise derived from `--verbose`
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("egg_timer={}", self.log_level())))
    }
}
