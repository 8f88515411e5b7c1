//! Command line argument parsing for the Sybil CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Sybil - fake-account risk scoring for social-media profiles
#[derive(Parser, Debug, Clone)]
#[command(name = "sybil")]
#[command(about = "Fake-account risk scoring for social-media profiles")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SybilArgs {
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

impl SybilArgs {
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

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the scoring model (or reload a persisted one)
    Train(TrainArgs),

    /// Analyze one profile and print its scoring result
    Analyze(AnalyzeArgs),

    /// List recorded ledger rows
    Ledger(LedgerArgs),

    /// Show aggregate ledger statistics
    Stats(StatsArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Where to persist the trained model
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Synthetic training corpus size (must be even)
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// Random seed for the training pass
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Retrain from scratch even if a persisted model exists
    #[arg(long)]
    pub force: bool,
}

/// Arguments for analyzing a profile
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Profile JSON file (stdin when omitted)
    #[arg(value_name = "PROFILE_FILE")]
    pub profile: Option<PathBuf>,

    /// Persisted model to reuse (trains in-process when omitted or stale)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Ledger file; profiles at or above the reporting threshold are
    /// recorded there
    #[arg(long, value_name = "LEDGER_FILE")]
    pub ledger: Option<PathBuf>,

    /// Print a full plain-text report after the summary
    #[arg(long)]
    pub report: bool,

    /// Synthetic training corpus size used when training in-process
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// Random seed used when training in-process
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Arguments for listing ledger rows
#[derive(Parser, Debug, Clone)]
pub struct LedgerArgs {
    /// Ledger file to read
    #[arg(value_name = "LEDGER_FILE")]
    pub path: PathBuf,

    /// Maximum rows to print, newest first
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,
}

/// Arguments for ledger statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Ledger file to read
    #[arg(value_name = "LEDGER_FILE")]
    pub path: PathBuf,
}
