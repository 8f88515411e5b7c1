//! Feature extraction and preprocessing.
//!
//! A [`ProfileRecord`] is mapped to a [`FeatureVector`] — eleven numeric
//! features in a fixed order plus the raw bio text. The numeric part is
//! standardized by [`StandardScaler`] and the bio is vectorized by
//! [`TfidfVectorizer`]; the classifier consumes their concatenation. The
//! feature order here must match the order used at training time, so it is
//! defined once in [`FEATURE_NAMES`].

pub mod extractor;
pub mod scaler;
pub mod vectorizer;

pub use extractor::FeatureExtractor;
pub use scaler::StandardScaler;
pub use vectorizer::{DEFAULT_MAX_FEATURES, TfidfVectorizer};

use serde::{Deserialize, Serialize};

/// Number of numeric features extracted from a profile.
pub const FEATURE_COUNT: usize = 11;

/// Fixed feature order, shared by training and inference.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "username_length",
    "username_digits",
    "bio_length",
    "profile_pic",
    "followers",
    "following",
    "posts",
    "account_age_days",
    "verified",
    "engagement_rate",
    "posting_frequency",
];

const IDX_USERNAME_LENGTH: usize = 0;
const IDX_USERNAME_DIGITS: usize = 1;
const IDX_BIO_LENGTH: usize = 2;
const IDX_PROFILE_PIC: usize = 3;
const IDX_FOLLOWERS: usize = 4;
const IDX_FOLLOWING: usize = 5;
const IDX_POSTS: usize = 6;
const IDX_ACCOUNT_AGE_DAYS: usize = 7;
const IDX_VERIFIED: usize = 8;
const IDX_ENGAGEMENT_RATE: usize = 9;
const IDX_POSTING_FREQUENCY: usize = 10;

/// The derived representation of one profile: eleven numeric features in
/// [`FEATURE_NAMES`] order plus the raw bio text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Numeric features, in [`FEATURE_NAMES`] order.
    pub values: [f64; FEATURE_COUNT],
    /// Raw bio text, possibly empty.
    pub bio: String,
}

impl FeatureVector {
    pub fn username_length(&self) -> f64 {
        self.values[IDX_USERNAME_LENGTH]
    }

    pub fn username_digits(&self) -> f64 {
        self.values[IDX_USERNAME_DIGITS]
    }

    pub fn bio_length(&self) -> f64 {
        self.values[IDX_BIO_LENGTH]
    }

    pub fn has_profile_picture(&self) -> bool {
        self.values[IDX_PROFILE_PIC] != 0.0
    }

    pub fn followers(&self) -> f64 {
        self.values[IDX_FOLLOWERS]
    }

    pub fn following(&self) -> f64 {
        self.values[IDX_FOLLOWING]
    }

    pub fn posts(&self) -> f64 {
        self.values[IDX_POSTS]
    }

    pub fn account_age_days(&self) -> f64 {
        self.values[IDX_ACCOUNT_AGE_DAYS]
    }

    pub fn verified(&self) -> bool {
        self.values[IDX_VERIFIED] != 0.0
    }

    pub fn engagement_rate(&self) -> f64 {
        self.values[IDX_ENGAGEMENT_RATE]
    }

    pub fn posting_frequency(&self) -> f64 {
        self.values[IDX_POSTING_FREQUENCY]
    }

    /// Iterate features as `(name, value)` pairs in fixed order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_is_stable() {
        assert_eq!(FEATURE_NAMES[0], "username_length");
        assert_eq!(FEATURE_NAMES[10], "posting_frequency");
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_named_accessors_match_indices() {
        let mut values = [0.0; FEATURE_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = i as f64;
        }
        let fv = FeatureVector {
            values,
            bio: String::new(),
        };
        assert_eq!(fv.username_length(), 0.0);
        assert_eq!(fv.username_digits(), 1.0);
        assert_eq!(fv.bio_length(), 2.0);
        assert!(fv.has_profile_picture());
        assert_eq!(fv.followers(), 4.0);
        assert_eq!(fv.following(), 5.0);
        assert_eq!(fv.account_age_days(), 7.0);
        assert_eq!(fv.posting_frequency(), 10.0);

        let named: Vec<_> = fv.named().collect();
        assert_eq!(named[4], ("followers", 4.0));
    }
}
