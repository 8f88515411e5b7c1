//! Command implementations for the Sybil CLI.
//!
//! The CLI is the request-handling collaborator: it validates identifying
//! fields the scoring core treats as optional, invokes the ledger when a
//! score crosses the reporting threshold, and renders results.

use std::fs;
use std::io::Read;
use std::time::Instant;

use chrono::Utc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SybilError};
use crate::ledger::Ledger;
use crate::model::{ForestParams, ModelConfig};
use crate::pipeline::{DetectionPipeline, PipelineConfig};
use crate::profile::ProfileRecord;
use crate::report::Report;
use crate::risk::MEDIUM_RISK_THRESHOLD;

/// Execute a CLI command.
pub fn execute_command(args: SybilArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze_profile(analyze_args.clone(), &args),
        Command::Ledger(ledger_args) => list_ledger(ledger_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

fn pipeline_config(
    model_path: Option<std::path::PathBuf>,
    samples: usize,
    seed: u64,
) -> PipelineConfig {
    PipelineConfig {
        training_samples: samples,
        model_path,
        model: ModelConfig {
            seed,
            forest: ForestParams::default(),
            ..ModelConfig::default()
        },
    }
}

/// Train (or reload) the model.
fn train_model(args: TrainArgs, cli_args: &SybilArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Training on {} synthetic examples (seed {})", args.samples, args.seed);
    }

    let start = Instant::now();
    let pipeline = DetectionPipeline::new(pipeline_config(
        args.model.clone(),
        args.samples,
        args.seed,
    ));
    let model = if args.force {
        pipeline.retrain()?
    } else {
        pipeline.train()?
    };
    let duration = start.elapsed();

    let output = TrainingOutput {
        model_path: args.model.map(|p| p.to_string_lossy().to_string()),
        training_examples: model.metadata().training_examples,
        vocabulary_size: model.metadata().vocabulary_size,
        trees: model.forest().n_trees(),
        duration_ms: duration.as_millis() as u64,
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&output, cli_args)?,
        OutputFormat::Human => {
            if cli_args.verbosity() > 0 {
                println!(
                    "Model ready: {} examples, {} vocabulary terms, {} trees ({} ms)",
                    output.training_examples,
                    output.vocabulary_size,
                    output.trees,
                    output.duration_ms
                );
                if let Some(path) = &output.model_path {
                    println!("Saved to: {path}");
                }
            }
        }
    }
    Ok(())
}

/// Analyze one profile, recording it to the ledger when warranted.
fn analyze_profile(args: AnalyzeArgs, cli_args: &SybilArgs) -> Result<()> {
    let profile = load_profile(&args)?;

    // Identifying fields are this layer's validation responsibility; the
    // scoring core treats every profile field as optional.
    let platform = profile
        .platform
        .clone()
        .ok_or_else(|| SybilError::invalid_argument("missing required field: platform"))?;
    let username = profile
        .username
        .clone()
        .ok_or_else(|| SybilError::invalid_argument("missing required field: username"))?;

    let pipeline = DetectionPipeline::new(pipeline_config(
        args.model.clone(),
        args.samples,
        args.seed,
    ));
    let analysis = pipeline.analyze(&profile)?;

    let receipt = match &args.ledger {
        Some(path) if analysis.fake_probability >= MEDIUM_RISK_THRESHOLD => {
            let ledger = Ledger::open(path)?;
            let evidence = serde_json::to_string(&analysis.explanation)?;
            Some(ledger.record(&platform, &username, analysis.fake_probability, &evidence)?)
        }
        _ => None,
    };

    let output = AnalysisOutput {
        analysis,
        ledger: receipt,
        timestamp: Utc::now(),
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&output, cli_args)?,
        OutputFormat::Human => {
            println!("@{username} on {platform}");
            println!(
                "  Risk score:  {:.2}%",
                output.analysis.fake_probability * 100.0
            );
            println!("  Risk level:  {}", output.analysis.risk_level);
            println!("  Confidence:  {:.2}%", output.analysis.confidence * 100.0);
            if output.analysis.explanation.is_empty() {
                println!("  No risk indicators triggered");
            } else {
                println!("  Indicators:");
                for reason in &output.analysis.explanation {
                    println!("    - {reason}");
                }
            }
            if let Some(receipt) = &output.ledger {
                println!("  Ledger tx:   {}", receipt.tx_hash);
            }
            if args.report {
                let tx_hash = output.ledger.as_ref().map(|r| r.tx_hash.clone());
                let report = Report::new(&platform, &username, &output.analysis, tx_hash);
                println!();
                print!("{}", report.to_text());
            }
        }
    }
    Ok(())
}

/// List ledger rows, newest first.
fn list_ledger(args: LedgerArgs, cli_args: &SybilArgs) -> Result<()> {
    let ledger = Ledger::open(&args.path)?;
    let records = ledger.records(args.limit)?;
    let output = LedgerListOutput {
        total: records.len(),
        records,
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&output, cli_args)?,
        OutputFormat::Human => {
            if output.records.is_empty() {
                println!("Ledger is empty");
            }
            for record in &output.records {
                println!(
                    "{}  {:<10} @{:<20} risk {:.2}  {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.platform,
                    record.username,
                    record.risk_score,
                    record.tx_hash
                );
            }
        }
    }
    Ok(())
}

/// Show aggregate ledger statistics.
fn show_stats(args: StatsArgs, cli_args: &SybilArgs) -> Result<()> {
    let ledger = Ledger::open(&args.path)?;
    let stats = ledger.stats()?;
    let output = StatsOutput {
        stats,
        ledger_path: args.path.to_string_lossy().to_string(),
    };

    match cli_args.output_format {
        OutputFormat::Json => print_json(&output, cli_args)?,
        OutputFormat::Human => {
            println!("Ledger: {}", output.ledger_path);
            println!("  Total reports:     {}", output.stats.total_reports);
            println!("  High-risk reports: {}", output.stats.high_risk_reports);
        }
    }
    Ok(())
}

fn load_profile(args: &AnalyzeArgs) -> Result<ProfileRecord> {
    let content = match &args.profile {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let profile = serde_json::from_str(&content)?;
    Ok(profile)
}
