//! Profile input and scoring output types.

use serde::{Deserialize, Serialize};

use crate::features::FEATURE_COUNT;
use crate::risk::RiskLevel;

/// Raw attributes of a social-media account under evaluation.
///
/// Every field is optional at this boundary: absent numeric fields are
/// substituted with bounded pseudo-random defaults by the feature extractor
/// (see [`crate::features::FeatureExtractor`]), so the pipeline never fails
/// on missing data. Callers should still prefer supplying real values —
/// defaults are uninformative by design.
///
/// `platform` is carried opaquely for collaborators (ledger, report); the
/// scoring core never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub platform: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    #[serde(alias = "profile_picture_present")]
    pub profile_picture: Option<bool>,
    #[serde(alias = "follower_count")]
    pub followers: Option<u64>,
    #[serde(alias = "following_count")]
    pub following: Option<u64>,
    #[serde(alias = "post_count")]
    pub posts: Option<u64>,
    pub account_age_days: Option<u64>,
    pub verified: Option<bool>,
    pub engagement_rate: Option<f64>,
    pub posting_frequency: Option<f64>,
}

/// Result of scoring one profile.
///
/// Either every field is populated or the whole `analyze` call fails; the
/// pipeline never returns a partial result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Posterior probability that the profile is fake, in [0, 1].
    pub fake_probability: f64,
    /// Discrete risk tier derived from `fake_probability`.
    pub risk_level: RiskLevel,
    /// Maximum class posterior, the classifier's self-reported confidence.
    pub confidence: f64,
    /// The numeric feature values the score was computed from, in the fixed
    /// order of [`crate::features::FEATURE_NAMES`].
    pub features: [f64; FEATURE_COUNT],
    /// Human-readable reasons, in fixed rule order. Empty is a valid,
    /// low-information outcome, not evidence of correctness.
    pub explanation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_record_default_is_all_absent() {
        let profile = ProfileRecord::default();
        assert!(profile.username.is_none());
        assert!(profile.followers.is_none());
        assert!(profile.engagement_rate.is_none());
    }

    #[test]
    fn test_profile_record_accepts_alias_field_names() {
        let json = r#"{
            "platform": "instagram",
            "username": "real_person_42",
            "profile_picture_present": true,
            "follower_count": 340,
            "following_count": 210,
            "post_count": 87
        }"#;
        let profile: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(profile.profile_picture, Some(true));
        assert_eq!(profile.followers, Some(340));
        assert_eq!(profile.following, Some(210));
        assert_eq!(profile.posts, Some(87));
    }

    #[test]
    fn test_profile_record_ignores_no_fields_silently() {
        let json = r#"{"username": "someone"}"#;
        let profile: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(profile.username.as_deref(), Some("someone"));
        assert!(profile.bio.is_none());
    }

    #[test]
    fn test_scoring_result_round_trip() {
        let result = ScoringResult {
            fake_probability: 0.82,
            risk_level: RiskLevel::High,
            confidence: 0.82,
            features: [0.0; FEATURE_COUNT],
            explanation: vec!["No profile picture".to_string()],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"risk_level\":\"high\""));
        let back: ScoringResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
