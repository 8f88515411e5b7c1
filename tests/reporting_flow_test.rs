//! Integration of the scoring core with its ledger and report
//! collaborators: the caller records a profile only when the fake
//! probability reaches the medium-risk boundary.

use tempfile::TempDir;

use sybil::ledger::Ledger;
use sybil::model::{ForestParams, ModelConfig};
use sybil::prelude::*;
use sybil::report::Report;

fn pipeline() -> DetectionPipeline {
    DetectionPipeline::new(PipelineConfig {
        training_samples: 400,
        model: ModelConfig {
            forest: ForestParams {
                n_estimators: 30,
                ..ForestParams::default()
            },
            ..ModelConfig::default()
        },
        ..PipelineConfig::default()
    })
}

fn suspicious_profile() -> ProfileRecord {
    ProfileRecord {
        platform: Some("twitter".to_string()),
        username: Some("follow4follow99".to_string()),
        bio: Some("follow back dm for collab".to_string()),
        profile_picture: Some(false),
        followers: Some(10),
        following: Some(3000),
        posts: Some(2),
        account_age_days: Some(10),
        ..ProfileRecord::default()
    }
}

fn genuine_profile() -> ProfileRecord {
    ProfileRecord {
        platform: Some("instagram".to_string()),
        username: Some("real_person_42".to_string()),
        bio: Some("software engineer, love hiking and photography".to_string()),
        profile_picture: Some(true),
        followers: Some(340),
        following: Some(210),
        posts: Some(87),
        account_age_days: Some(900),
        verified: Some(false),
        engagement_rate: Some(0.04),
        posting_frequency: Some(2.0),
    }
}

#[test]
fn test_high_risk_profile_flows_to_ledger_and_report() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::with_seed(dir.path().join("ledger.jsonl"), 7)?;
    let pipeline = pipeline();

    let result = pipeline.analyze(&suspicious_profile())?;
    assert!(result.fake_probability >= MEDIUM_RISK_THRESHOLD);

    // Ledger write decision belongs to the caller, keyed off the same
    // constant as the medium tier boundary.
    let evidence = serde_json::to_string(&result.explanation)?;
    let receipt = ledger.record("twitter", "follow4follow99", result.fake_probability, &evidence)?;
    assert!(receipt.tx_hash.starts_with("0x"));

    let stats = ledger.stats()?;
    assert_eq!(stats.total_reports, 1);

    let report = Report::new(
        "twitter",
        "follow4follow99",
        &result,
        Some(receipt.tx_hash.clone()),
    );
    let text = report.to_text();
    assert!(text.contains("@follow4follow99"));
    assert!(text.contains("Risk level:  HIGH"));
    assert!(text.contains(&receipt.tx_hash));
    Ok(())
}

#[test]
fn test_low_risk_profile_is_not_recorded() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::with_seed(dir.path().join("ledger.jsonl"), 7)?;
    let pipeline = pipeline();

    let result = pipeline.analyze(&genuine_profile())?;
    assert!(result.fake_probability < MEDIUM_RISK_THRESHOLD);

    // Below the boundary the caller skips the ledger entirely.
    let stats = ledger.stats()?;
    assert_eq!(stats.total_reports, 0);

    // A report can still be formatted; an empty explanation is a valid,
    // low-information outcome.
    let report = Report::new("instagram", "real_person_42", &result, None);
    assert!(report.to_text().contains("Risk level:  LOW"));
    Ok(())
}

#[test]
fn test_ledger_round_trip_preserves_evidence() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::with_seed(dir.path().join("ledger.jsonl"), 7)?;
    let pipeline = pipeline();

    let result = pipeline.analyze(&suspicious_profile())?;
    let evidence = serde_json::to_string(&result.explanation)?;
    ledger.record("twitter", "follow4follow99", result.fake_probability, &evidence)?;

    let records = ledger.records(10)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].evidence, evidence);

    let explanation: Vec<String> = serde_json::from_str(&records[0].evidence)?;
    assert_eq!(explanation, result.explanation);
    Ok(())
}
