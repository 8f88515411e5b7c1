//! Trained model: fitted vectorizer, scaler, and classifier as one
//! immutable artifact, with JSON persistence behind a crc32 integrity
//! check.

pub mod forest;
pub mod tree;

pub use forest::{ForestParams, RandomForestClassifier};
pub use tree::DecisionTree;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SybilError};
use crate::features::{FEATURE_COUNT, FeatureVector, StandardScaler, TfidfVectorizer};
use crate::features::vectorizer::DEFAULT_MAX_FEATURES;
use crate::synth::TrainingExample;

/// Configuration for one training pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Master random seed: drives the forest, and downstream the
    /// synthesizer and default-fill RNG in the pipeline.
    pub seed: u64,
    /// Vocabulary cap for the text vectorizer.
    pub max_vocabulary: usize,
    /// Forest hyperparameters.
    pub forest: ForestParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_vocabulary: DEFAULT_MAX_FEATURES,
            forest: ForestParams::default(),
        }
    }
}

/// Metadata recorded at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Crate version that produced the model.
    pub version: String,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Terms in the frozen vocabulary.
    pub vocabulary_size: usize,
    /// Seed the training pass ran with.
    pub seed: u64,
}

/// The three fitted artifacts plus metadata.
///
/// Immutable after `fit` for the process lifetime; scoring borrows it
/// read-only, so concurrent callers need no locking once trained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    vectorizer: TfidfVectorizer,
    scaler: StandardScaler,
    forest: RandomForestClassifier,
    metadata: ModelMetadata,
}

impl TrainedModel {
    /// Run one synchronous training pass over labeled examples.
    pub fn fit(examples: &[TrainingExample], config: &ModelConfig) -> Result<Self> {
        if examples.is_empty() {
            return Err(SybilError::training(
                "cannot fit a model on an empty training set",
            ));
        }

        let matrix: Vec<[f64; FEATURE_COUNT]> =
            examples.iter().map(|example| example.features).collect();
        let bios: Vec<String> = examples.iter().map(|example| example.bio.clone()).collect();
        let labels: Vec<bool> = examples.iter().map(|example| example.label).collect();

        let mut scaler = StandardScaler::new();
        scaler.fit(&matrix)?;
        let mut vectorizer = TfidfVectorizer::with_max_features(config.max_vocabulary);
        vectorizer.fit(&bios)?;

        let mut rows = Vec::with_capacity(examples.len());
        for (features, bio) in matrix.iter().zip(bios.iter()) {
            let scaled = scaler.transform(features)?;
            let mut row = scaled.to_vec();
            row.extend(vectorizer.transform(bio)?);
            rows.push(row);
        }

        let mut forest = RandomForestClassifier::new(config.forest.clone());
        forest.train(&rows, &labels, config.seed)?;

        let metadata = ModelMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: Utc::now(),
            training_examples: examples.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            seed: config.seed,
        };
        log::info!(
            "model trained: {} examples, {} vocabulary terms, {} trees",
            metadata.training_examples,
            metadata.vocabulary_size,
            forest.n_trees()
        );

        Ok(TrainedModel {
            vectorizer,
            scaler,
            forest,
            metadata,
        })
    }

    /// Score one extracted feature vector.
    ///
    /// Returns `(p_fake, confidence)`; errors only if a component is not
    /// fitted, which [`fit`](Self::fit) rules out for values it returns.
    pub fn score(&self, features: &FeatureVector) -> Result<(f64, f64)> {
        let scaled = self.scaler.transform(&features.values)?;
        let mut row = scaled.to_vec();
        row.extend(self.vectorizer.transform(&features.bio)?);
        self.forest.predict_proba(&row)
    }

    pub fn is_trained(&self) -> bool {
        self.scaler.is_fitted() && self.vectorizer.is_fitted() && self.forest.is_trained()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn forest(&self) -> &RandomForestClassifier {
        &self.forest
    }

    /// Persist the model as JSON behind a crc32 checksum header line.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(self)?;
        let checksum = crc32fast::hash(json.as_bytes());
        fs::write(path, format!("{checksum:08x}\n{json}"))?;
        log::info!("model saved to {}", path.display());
        Ok(())
    }

    /// Reload a persisted model, verifying the checksum before decoding.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let (header, json) = content.split_once('\n').ok_or_else(|| {
            SybilError::serialization(format!(
                "model file {} is missing its checksum header",
                path.display()
            ))
        })?;
        let expected = u32::from_str_radix(header.trim(), 16).map_err(|_| {
            SybilError::serialization(format!(
                "model file {} has a malformed checksum header",
                path.display()
            ))
        })?;
        let actual = crc32fast::hash(json.as_bytes());
        if expected != actual {
            return Err(SybilError::serialization(format!(
                "model file {} failed its checksum",
                path.display()
            )));
        }

        let model: TrainedModel = serde_json::from_str(json)?;
        if !model.is_trained() {
            return Err(SybilError::serialization(format!(
                "model file {} does not contain a trained model",
                path.display()
            )));
        }
        log::info!("model loaded from {}", path.display());
        Ok(model)
    }
}
