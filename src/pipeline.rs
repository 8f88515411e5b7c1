//! Pipeline orchestrator: owns the trained-model lifecycle and composes
//! extraction, scoring, tier mapping, and explanation into `analyze`.
//!
//! The lifecycle is a state machine over {Untrained, Training, Ready}. The
//! first `analyze` (or an explicit `train`) moves Untrained → Training →
//! Ready, synchronously, guarded by a mutex so concurrent first requests
//! trigger exactly one training pass. Once Ready the model is read-only and
//! scoring takes no lock beyond an `Arc` clone, so concurrent `analyze`
//! calls need no further coordination.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SybilError};
use crate::explain::explain;
use crate::features::FeatureExtractor;
use crate::model::{ModelConfig, TrainedModel};
use crate::profile::{ProfileRecord, ScoringResult};
use crate::risk::RiskLevel;
use crate::synth::TrainingDataSynthesizer;

/// Pipeline construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Synthetic corpus size for a fresh training pass. Must be even.
    pub training_samples: usize,
    /// Optional persistence location. When set, `train` reloads a valid
    /// persisted model instead of fitting, and saves after a fresh fit.
    pub model_path: Option<PathBuf>,
    /// Training configuration (seed, vocabulary cap, forest parameters).
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            training_samples: 1000,
            model_path: None,
            model: ModelConfig::default(),
        }
    }
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Untrained,
    Training,
    Ready,
}

enum State {
    Untrained,
    Training,
    Ready(Arc<TrainedModel>),
}

/// The single logical pipeline instance shared across scoring requests.
pub struct DetectionPipeline {
    config: PipelineConfig,
    extractor: FeatureExtractor,
    state: RwLock<State>,
    /// One-time-initialization guard for the Untrained → Training edge.
    train_guard: Mutex<()>,
    /// Seedable source for default-fill substitution of missing fields.
    fill_rng: Mutex<StdRng>,
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl DetectionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let fill_rng = Mutex::new(StdRng::seed_from_u64(config.model.seed));
        DetectionPipeline {
            config,
            extractor: FeatureExtractor::new(),
            state: RwLock::new(State::Untrained),
            train_guard: Mutex::new(()),
            fill_rng,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn status(&self) -> PipelineStatus {
        match &*self.state.read() {
            State::Untrained => PipelineStatus::Untrained,
            State::Training => PipelineStatus::Training,
            State::Ready(_) => PipelineStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == PipelineStatus::Ready
    }

    /// Ensure a trained model exists. Idempotent no-op once Ready.
    pub fn train(&self) -> Result<Arc<TrainedModel>> {
        self.ensure_trained()
    }

    /// Discard any current model and run a fresh training pass, ignoring a
    /// persisted model file (it is overwritten on success).
    pub fn retrain(&self) -> Result<Arc<TrainedModel>> {
        let _guard = self.train_guard.lock();
        *self.state.write() = State::Training;
        match self.fit_fresh() {
            Ok(model) => Ok(self.install(model)),
            Err(err) => {
                *self.state.write() = State::Untrained;
                Err(as_training_failure(err))
            }
        }
    }

    /// Score one profile. Trains first (synchronously, blocking the caller)
    /// if no model exists yet — `analyze` always produces a result rather
    /// than failing on an untrained pipeline.
    pub fn analyze(&self, profile: &ProfileRecord) -> Result<ScoringResult> {
        let model = self.ensure_trained()?;

        let features = {
            let mut rng = self.fill_rng.lock();
            self.extractor.extract(profile, &mut *rng)
        };
        let (fake_probability, confidence) = model.score(&features)?;
        let risk_level = RiskLevel::from_probability(fake_probability);
        let explanation = explain(&features);

        Ok(ScoringResult {
            fake_probability,
            risk_level,
            confidence,
            features: features.values,
            explanation,
        })
    }

    fn ensure_trained(&self) -> Result<Arc<TrainedModel>> {
        if let State::Ready(model) = &*self.state.read() {
            return Ok(Arc::clone(model));
        }

        let _guard = self.train_guard.lock();
        // Another caller may have finished training while we waited.
        if let State::Ready(model) = &*self.state.read() {
            return Ok(Arc::clone(model));
        }

        *self.state.write() = State::Training;
        match self.fit_or_load() {
            Ok(model) => Ok(self.install(model)),
            Err(err) => {
                // The base design treats a failed training pass as fatal;
                // we surface the error and leave the pipeline Untrained so
                // the host process can decide whether to retry or die.
                *self.state.write() = State::Untrained;
                Err(as_training_failure(err))
            }
        }
    }

    fn install(&self, model: TrainedModel) -> Arc<TrainedModel> {
        let model = Arc::new(model);
        *self.state.write() = State::Ready(Arc::clone(&model));
        model
    }

    fn fit_or_load(&self) -> Result<TrainedModel> {
        if let Some(path) = &self.config.model_path {
            if path.exists() {
                match TrainedModel::load(path) {
                    Ok(model) => return Ok(model),
                    Err(err) => {
                        log::warn!(
                            "discarding persisted model at {}: {err}",
                            path.display()
                        );
                    }
                }
            }
        }
        self.fit_fresh()
    }

    fn fit_fresh(&self) -> Result<TrainedModel> {
        log::info!(
            "training fake-account model on {} synthetic examples",
            self.config.training_samples
        );
        let synthesizer = TrainingDataSynthesizer::new(self.config.model.seed);
        let examples = synthesizer.generate(self.config.training_samples)?;
        let model = TrainedModel::fit(&examples, &self.config.model)?;

        if let Some(path) = &self.config.model_path {
            if let Err(err) = model.save(path) {
                // Persistence is an optimization; scoring proceeds with the
                // in-memory model.
                log::warn!("failed to persist model to {}: {err}", path.display());
            }
        }
        Ok(model)
    }
}

fn as_training_failure(err: SybilError) -> SybilError {
    match err {
        SybilError::Training(_) => err,
        other => SybilError::training(format!("training pass failed: {other}")),
    }
}
