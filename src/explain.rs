//! Rule-based explanation generation.
//!
//! An ordered list of independent checks over the extracted features and
//! raw bio text. The order is fixed so explanation sequences are
//! reproducible; each rule contributes at most one string, and an empty
//! sequence is a valid low-information outcome.

use crate::features::FeatureVector;

/// Digit count in the username at or above this triggers the digit rule.
pub const USERNAME_DIGIT_THRESHOLD: f64 = 4.0;
/// Bio character counts below this trigger the short-bio rule.
pub const SHORT_BIO_THRESHOLD: f64 = 20.0;
/// Account ages below this many days trigger the recent-account rule.
pub const NEW_ACCOUNT_AGE_DAYS: f64 = 30.0;
/// Follower/following ratios above this trigger the ratio rule.
pub const FOLLOW_RATIO_HIGH: f64 = 5.0;
/// Follower/following ratios below this trigger the ratio rule.
pub const FOLLOW_RATIO_LOW: f64 = 0.1;

/// Phrases whose presence in a bio (case-insensitive substring) triggers
/// the promotional-phrasing rule.
pub const SUSPICIOUS_BIO_PHRASES: &[&str] = &["follow back", "follow4follow", "dm for collab"];

/// Produce the ordered explanation sequence for one feature vector.
pub fn explain(features: &FeatureVector) -> Vec<String> {
    let mut explanations = Vec::new();

    if features.username_digits() >= USERNAME_DIGIT_THRESHOLD {
        explanations.push("Username contains many digits".to_string());
    }

    if features.bio_length() < SHORT_BIO_THRESHOLD {
        explanations.push("Bio is missing or very short".to_string());
    }

    if !features.has_profile_picture() {
        explanations.push("No profile picture".to_string());
    }

    if features.account_age_days() < NEW_ACCOUNT_AGE_DAYS {
        explanations.push("Recently created account".to_string());
    }

    if features.following() > 0.0 {
        let ratio = features.followers() / features.following();
        if ratio > FOLLOW_RATIO_HIGH || ratio < FOLLOW_RATIO_LOW {
            explanations.push("Unusual follower-to-following ratio".to_string());
        }
    }

    let bio = features.bio.to_lowercase();
    if SUSPICIOUS_BIO_PHRASES
        .iter()
        .any(|phrase| bio.contains(phrase))
    {
        explanations.push("Bio contains promotional or spam phrasing".to_string());
    }

    explanations
}
