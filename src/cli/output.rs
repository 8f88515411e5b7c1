//! Output structures and JSON printing for CLI commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::SybilArgs;
use crate::error::Result;
use crate::ledger::{LedgerReceipt, LedgerRecord, LedgerStats};
use crate::profile::ScoringResult;

/// Result structure for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub analysis: ScoringResult,
    /// Receipt when the profile crossed the reporting threshold and a
    /// ledger was configured.
    pub ledger: Option<LedgerReceipt>,
    pub timestamp: DateTime<Utc>,
}

/// Result structure for the train command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingOutput {
    pub model_path: Option<String>,
    pub training_examples: usize,
    pub vocabulary_size: usize,
    pub trees: usize,
    pub duration_ms: u64,
}

/// Result structure for the ledger command.
#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerListOutput {
    pub records: Vec<LedgerRecord>,
    pub total: usize,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub stats: LedgerStats,
    pub ledger_path: String,
}

/// Print a value as JSON, honoring `--pretty`.
pub fn print_json<T: Serialize>(value: &T, cli_args: &SybilArgs) -> Result<()> {
    let json = if cli_args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
