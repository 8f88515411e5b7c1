//! Deterministic feature extraction with an explicit default-fill policy.

use std::ops::Range;

use rand::Rng;

use crate::features::{FEATURE_COUNT, FeatureVector};
use crate::profile::ProfileRecord;

/// Default range substituted for a missing follower count.
pub const DEFAULT_FOLLOWERS: Range<u64> = 0..1000;
/// Default range substituted for a missing following count.
pub const DEFAULT_FOLLOWING: Range<u64> = 0..2000;
/// Default range substituted for a missing post count.
pub const DEFAULT_POSTS: Range<u64> = 0..100;
/// Default range substituted for a missing account age, in days.
pub const DEFAULT_ACCOUNT_AGE_DAYS: Range<u64> = 1..365;
/// Default range substituted for a missing engagement rate.
pub const DEFAULT_ENGAGEMENT_RATE: Range<f64> = 0.0..0.1;
/// Default range substituted for a missing posting frequency.
pub const DEFAULT_POSTING_FREQUENCY: Range<f64> = 0.0..20.0;

/// Maps a [`ProfileRecord`] to a [`FeatureVector`].
///
/// Extraction is total: it never fails, for any well-typed input. Missing
/// network and behavioral fields are substituted with bounded pseudo-random
/// defaults from the ranges above. The substitution is an explicit policy,
/// not noise to be hidden — the defaults are uninformative and exist only so
/// the pipeline never fails on missing data. The random source is injected
/// by the caller so tests can pin the seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        FeatureExtractor
    }

    /// Extract the eleven numeric features and the raw bio text.
    pub fn extract<R: Rng>(&self, profile: &ProfileRecord, rng: &mut R) -> FeatureVector {
        let username = profile.username.as_deref().unwrap_or("");
        let bio = profile.bio.as_deref().unwrap_or("");

        let username_length = username.chars().count() as f64;
        let username_digits = username.chars().filter(|c| c.is_ascii_digit()).count() as f64;
        let bio_length = bio.chars().count() as f64;
        let profile_pic = if profile.profile_picture.unwrap_or(false) {
            1.0
        } else {
            0.0
        };

        let followers = profile
            .followers
            .unwrap_or_else(|| rng.random_range(DEFAULT_FOLLOWERS)) as f64;
        let following = profile
            .following
            .unwrap_or_else(|| rng.random_range(DEFAULT_FOLLOWING)) as f64;
        let posts = profile
            .posts
            .unwrap_or_else(|| rng.random_range(DEFAULT_POSTS)) as f64;
        let account_age_days = profile
            .account_age_days
            .unwrap_or_else(|| rng.random_range(DEFAULT_ACCOUNT_AGE_DAYS))
            as f64;

        let verified = if profile.verified.unwrap_or(false) {
            1.0
        } else {
            0.0
        };
        let engagement_rate = profile
            .engagement_rate
            .map(|rate| rate.clamp(0.0, 1.0))
            .unwrap_or_else(|| rng.random_range(DEFAULT_ENGAGEMENT_RATE));
        let posting_frequency = profile
            .posting_frequency
            .map(|freq| freq.max(0.0))
            .unwrap_or_else(|| rng.random_range(DEFAULT_POSTING_FREQUENCY));

        let values: [f64; FEATURE_COUNT] = [
            username_length,
            username_digits,
            bio_length,
            profile_pic,
            followers,
            following,
            posts,
            account_age_days,
            verified,
            engagement_rate,
            posting_frequency,
        ];

        FeatureVector {
            values,
            bio: bio.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn full_profile() -> ProfileRecord {
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
    fn test_extract_fully_specified_profile() {
        let extractor = FeatureExtractor::new();
        let mut rng = StdRng::seed_from_u64(7);
        let fv = extractor.extract(&full_profile(), &mut rng);

        assert_eq!(fv.username_length(), 14.0);
        assert_eq!(fv.username_digits(), 2.0);
        assert_eq!(fv.bio_length(), 46.0);
        assert!(fv.has_profile_picture());
        assert_eq!(fv.followers(), 340.0);
        assert_eq!(fv.following(), 210.0);
        assert_eq!(fv.posts(), 87.0);
        assert_eq!(fv.account_age_days(), 900.0);
        assert!(!fv.verified());
        assert_eq!(fv.engagement_rate(), 0.04);
        assert_eq!(fv.posting_frequency(), 2.0);
        assert_eq!(fv.bio, "software engineer, love hiking and photography");
    }

    #[test]
    fn test_extract_is_deterministic_without_defaults() {
        let extractor = FeatureExtractor::new();
        let profile = full_profile();
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        // Different RNG streams, but no field is defaulted, so the output
        // must be identical.
        assert_eq!(
            extractor.extract(&profile, &mut rng_a),
            extractor.extract(&profile, &mut rng_b)
        );
    }

    #[test]
    fn test_extract_empty_profile_is_total() {
        let extractor = FeatureExtractor::new();
        let mut rng = StdRng::seed_from_u64(42);
        let fv = extractor.extract(&ProfileRecord::default(), &mut rng);

        assert_eq!(fv.values.len(), FEATURE_COUNT);
        assert_eq!(fv.username_length(), 0.0);
        assert_eq!(fv.bio_length(), 0.0);
        assert!(!fv.has_profile_picture());
        assert_eq!(fv.bio, "");

        assert!(DEFAULT_FOLLOWERS.contains(&(fv.followers() as u64)));
        assert!(DEFAULT_FOLLOWING.contains(&(fv.following() as u64)));
        assert!(DEFAULT_POSTS.contains(&(fv.posts() as u64)));
        assert!(DEFAULT_ACCOUNT_AGE_DAYS.contains(&(fv.account_age_days() as u64)));
        assert!(fv.engagement_rate() >= 0.0 && fv.engagement_rate() < 0.1);
        assert!(fv.posting_frequency() >= 0.0 && fv.posting_frequency() < 20.0);
    }

    #[test]
    fn test_default_fill_pinned_by_seed() {
        let extractor = FeatureExtractor::new();
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let fv_a = extractor.extract(&ProfileRecord::default(), &mut rng_a);
        let fv_b = extractor.extract(&ProfileRecord::default(), &mut rng_b);
        assert_eq!(fv_a, fv_b);
    }

    #[test]
    fn test_engagement_rate_clamped() {
        let extractor = FeatureExtractor::new();
        let mut rng = StdRng::seed_from_u64(3);
        let profile = ProfileRecord {
            engagement_rate: Some(3.5),
            ..ProfileRecord::default()
        };
        let fv = extractor.extract(&profile, &mut rng);
        assert_eq!(fv.engagement_rate(), 1.0);
    }

    #[test]
    fn test_unicode_username_counted_in_chars() {
        let extractor = FeatureExtractor::new();
        let mut rng = StdRng::seed_from_u64(4);
        let profile = ProfileRecord {
            username: Some("héllo1".to_string()),
            ..ProfileRecord::default()
        };
        let fv = extractor.extract(&profile, &mut rng);
        assert_eq!(fv.username_length(), 6.0);
        assert_eq!(fv.username_digits(), 1.0);
    }
}
