//! Command-line interface definitions.

pub mod check;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::domain::startup::StartupMode;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// liftoff - Launch-time startup pipeline with simulated collaborators.
#[derive(Parser, Debug)]
#[command(name = "liftoff")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the startup pipeline once
    Run(RunArgs),

    /// Validate configuration file
    Check,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Launch mode (immediate or lazy); overrides `[startup] mode`
    #[arg(long)]
    pub mode: Option<StartupMode>,

    /// After a lazy launch, run the deferred consent flow and ad setup
    #[arg(long)]
    pub request_consent: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Load the config at `path`, or the defaults when no path was given.
#[allow(clippy::result_large_err)]
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}
