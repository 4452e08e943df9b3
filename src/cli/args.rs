//! Command line argument parsing for the Mayday CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::data::split::{DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use crate::ml::grid_search::GridSearch;

/// Mayday - disaster-response message triage
#[derive(Parser, Debug, Clone)]
#[command(name = "mayday")]
#[command(about = "Train and serve a multi-label classifier for disaster-response messages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MaydayArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MaydayArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier from a message database and persist the artifact
    Train(TrainArgs),

    /// Classify a single message with a persisted artifact
    Classify(ClassifyArgs),

    /// Serve the dashboard
    Serve(ServeArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the SQLite database holding the prepared messages
    #[arg(value_name = "DATABASE_PATH")]
    pub database_path: PathBuf,

    /// Path the model artifact is written to
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Run an exhaustive hyperparameter search before the final fit
    #[arg(long)]
    pub grid_search: bool,

    /// Fraction of records held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Cross-validation folds for the grid search
    #[arg(long, default_value_t = GridSearch::DEFAULT_FOLDS)]
    pub folds: usize,
}

/// Arguments for one-off classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to the model artifact
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// The message to classify
    #[arg(value_name = "MESSAGE")]
    pub message: String,
}

/// Arguments for serving the dashboard
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the SQLite database holding the prepared messages
    #[arg(value_name = "DATABASE_PATH")]
    pub database_path: PathBuf,

    /// Path to the model artifact
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Address to bind
    #[arg(long, env = "MAYDAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "MAYDAY_PORT", default_value_t = 8050)]
    pub port: u16,
}

/// Output format for CLI results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
