//! End-to-end tests for the scoring pipeline.

use sybil::model::{ForestParams, ModelConfig};
use sybil::prelude::*;

fn quick_config(seed: u64) -> PipelineConfig {
    PipelineConfig {
        training_samples: 400,
        model: ModelConfig {
            seed,
            forest: ForestParams {
                n_estimators: 30,
                ..ForestParams::default()
            },
            ..ModelConfig::default()
        },
        ..PipelineConfig::default()
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

#[test]
fn test_genuine_profile_scores_low() -> Result<()> {
    let pipeline = DetectionPipeline::default();
    let result = pipeline.analyze(&genuine_profile())?;

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.fake_probability < MEDIUM_RISK_THRESHOLD);
    assert!(result.explanation.is_empty());
    Ok(())
}

#[test]
fn test_suspicious_profile_scores_high() -> Result<()> {
    let pipeline = DetectionPipeline::default();
    let result = pipeline.analyze(&suspicious_profile())?;

    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result.fake_probability >= HIGH_RISK_THRESHOLD);
    // High risk always crosses the reporting threshold.
    assert!(result.fake_probability >= MEDIUM_RISK_THRESHOLD);
    Ok(())
}

#[test]
fn test_analyze_is_idempotent_for_fully_specified_profile() -> Result<()> {
    let pipeline = DetectionPipeline::new(quick_config(42));
    let profile = genuine_profile();

    let first = pipeline.analyze(&profile)?;
    let second = pipeline.analyze(&profile)?;

    // Every field is supplied, so no default substitution happens and the
    // two results must be identical, features included.
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_analyze_never_fails_on_empty_profile() -> Result<()> {
    let pipeline = DetectionPipeline::new(quick_config(42));
    let result = pipeline.analyze(&ProfileRecord::default())?;

    assert!((0.0..=1.0).contains(&result.fake_probability));
    assert!((0.5..=1.0).contains(&result.confidence));
    assert_eq!(result.features.len(), 11);
    Ok(())
}

#[test]
fn test_explanation_ordering_through_analyze() -> Result<()> {
    let pipeline = DetectionPipeline::new(quick_config(42));
    let profile = ProfileRecord {
        platform: Some("twitter".to_string()),
        username: Some("user1234".to_string()),
        bio: Some(String::new()),
        profile_picture: Some(false),
        account_age_days: Some(5),
        followers: Some(1),
        following: Some(100),
        ..ProfileRecord::default()
    };

    let result = pipeline.analyze(&profile)?;
    assert_eq!(
        result.explanation,
        vec![
            "Username contains many digits",
            "Bio is missing or very short",
            "No profile picture",
            "Recently created account",
            "Unusual follower-to-following ratio",
        ]
    );
    Ok(())
}

#[test]
fn test_fixed_seed_training_reproduces_probabilities() -> Result<()> {
    let pipeline_a = DetectionPipeline::new(quick_config(42));
    let pipeline_b = DetectionPipeline::new(quick_config(42));

    for profile in [genuine_profile(), suspicious_profile()] {
        let result_a = pipeline_a.analyze(&profile)?;
        let result_b = pipeline_b.analyze(&profile)?;
        assert!(
            (result_a.fake_probability - result_b.fake_probability).abs() < 1e-9,
            "independent training runs diverged: {} vs {}",
            result_a.fake_probability,
            result_b.fake_probability
        );
    }
    Ok(())
}

#[test]
fn test_confidence_is_max_class_posterior() -> Result<()> {
    let pipeline = DetectionPipeline::new(quick_config(42));
    for profile in [genuine_profile(), suspicious_profile()] {
        let result = pipeline.analyze(&profile)?;
        let expected = result.fake_probability.max(1.0 - result.fake_probability);
        assert!((result.confidence - expected).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_train_is_idempotent_and_observable() -> Result<()> {
    let pipeline = DetectionPipeline::new(quick_config(42));
    assert_eq!(pipeline.status(), PipelineStatus::Untrained);

    pipeline.train()?;
    assert_eq!(pipeline.status(), PipelineStatus::Ready);

    // A second train call must not change the scoring behavior.
    let before = pipeline.analyze(&genuine_profile())?;
    pipeline.train()?;
    let after = pipeline.analyze(&genuine_profile())?;
    assert_eq!(before, after);
    Ok(())
}
