//! Synthetic training corpus generation.
//!
//! When no persisted model exists the pipeline trains on generated data.
//! The fake and genuine distributions use disjoint parameter ranges by
//! design so the classifier can separate them; this is a stand-in for real
//! labeled data and makes no claim of real-world calibration.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SybilError};
use crate::features::FEATURE_COUNT;

/// Bio phrases drawn for fake-account examples.
pub const FAKE_BIO_PHRASES: &[&str] = &[
    "follow back",
    "follow4follow",
    "dm for collab",
    "influencer",
    "model",
    "",
    "entrepreneur",
];

/// Bio phrases drawn for genuine-account examples.
pub const GENUINE_BIO_PHRASES: &[&str] = &[
    "love traveling and photography",
    "software engineer at tech company",
    "passionate about art and music",
    "family first",
    "coffee lover",
    "working towards my dreams",
];

/// One labeled example: numeric features in the fixed order of
/// [`crate::features::FEATURE_NAMES`], the bio text, and the fake label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub features: [f64; FEATURE_COUNT],
    pub bio: String,
    pub label: bool,
}

/// Generates a balanced labeled corpus, deterministic for a fixed seed.
#[derive(Debug, Clone)]
pub struct TrainingDataSynthesizer {
    seed: u64,
}

impl Default for TrainingDataSynthesizer {
    fn default() -> Self {
        Self::new(42)
    }
}

impl TrainingDataSynthesizer {
    pub fn new(seed: u64) -> Self {
        TrainingDataSynthesizer { seed }
    }

    /// Generate `count` examples, half fake and half genuine.
    ///
    /// `count` must be even and positive.
    pub fn generate(&self, count: usize) -> Result<Vec<TrainingExample>> {
        if count == 0 || count % 2 != 0 {
            return Err(SybilError::invalid_argument(format!(
                "training corpus size must be an even positive integer, got {count}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut examples = Vec::with_capacity(count);
        for _ in 0..count / 2 {
            examples.push(Self::fake_example(&mut rng));
        }
        for _ in 0..count / 2 {
            examples.push(Self::genuine_example(&mut rng));
        }
        Ok(examples)
    }

    fn fake_example(rng: &mut StdRng) -> TrainingExample {
        let features: [f64; FEATURE_COUNT] = [
            rng.random_range(5..15u64) as f64,     // username_length
            rng.random_range(3..8u64) as f64,      // username_digits
            rng.random_range(0..50u64) as f64,     // bio_length
            if rng.random_bool(0.3) { 1.0 } else { 0.0 },
            rng.random_range(0..100u64) as f64,    // followers
            rng.random_range(500..5000u64) as f64, // following
            rng.random_range(0..20u64) as f64,     // posts
            rng.random_range(1..90u64) as f64,     // account_age_days
            0.0,                                   // verified
            rng.random_range(0.0..0.02),           // engagement_rate
            rng.random_range(5.0..50.0),           // posting_frequency
        ];
        let bio = FAKE_BIO_PHRASES.choose(rng).copied().unwrap_or("");
        TrainingExample {
            features,
            bio: bio.to_string(),
            label: true,
        }
    }

    fn genuine_example(rng: &mut StdRng) -> TrainingExample {
        let features: [f64; FEATURE_COUNT] = [
            rng.random_range(6..20u64) as f64,
            rng.random_range(0..3u64) as f64,
            rng.random_range(20..200u64) as f64,
            if rng.random_bool(0.9) { 1.0 } else { 0.0 },
            rng.random_range(50..2000u64) as f64,
            rng.random_range(50..1000u64) as f64,
            rng.random_range(10..500u64) as f64,
            rng.random_range(90..2000u64) as f64,
            if rng.random_bool(0.1) { 1.0 } else { 0.0 },
            rng.random_range(0.01..0.1),
            rng.random_range(0.5..10.0),
        ];
        let bio = GENUINE_BIO_PHRASES.choose(rng).copied().unwrap_or("");
        TrainingExample {
            features,
            bio: bio.to_string(),
            label: false,
        }
    }
}
