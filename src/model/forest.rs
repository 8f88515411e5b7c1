//! Random forest binary classifier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SybilError};
use crate::model::tree::{DecisionTree, TreeParams};

/// Hyperparameters for the forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 16,
            min_samples_split: 2,
        }
    }
}

/// Bagged ensemble of gini classification trees with balanced class
/// weighting.
///
/// Training classes are balanced 50/50 by construction here, but the
/// weighting must stay in place for robustness to future imbalance:
/// `w_c = n / (k * n_c)` per class, applied to every impurity computation
/// and leaf probability.
///
/// Per-tree RNG seeds are derived from the master seed before the parallel
/// fan-out, so a fixed seed reproduces the fitted forest exactly regardless
/// of thread scheduling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    params: ForestParams,
    trees: Vec<DecisionTree>,
    /// Combined feature dimension the forest was trained on.
    n_features: usize,
}

impl RandomForestClassifier {
    pub fn new(params: ForestParams) -> Self {
        RandomForestClassifier {
            params,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    /// Fit the ensemble on combined feature rows and boolean fake labels.
    pub fn train(&mut self, rows: &[Vec<f64>], labels: &[bool], seed: u64) -> Result<()> {
        if !self.trees.is_empty() {
            return Err(SybilError::invalid_operation("forest is already trained"));
        }
        if rows.len() != labels.len() {
            return Err(SybilError::invalid_argument(format!(
                "row/label length mismatch: {} rows, {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.len() < 2 {
            return Err(SybilError::training(
                "need at least two training rows to fit the forest",
            ));
        }

        let n = rows.len();
        let n_fake = labels.iter().filter(|&&label| label).count();
        let n_real = n - n_fake;
        if n_fake == 0 || n_real == 0 {
            return Err(SybilError::training(
                "training data must contain both classes",
            ));
        }

        // Balanced class weights: w_c = n / (k * n_c).
        let fake_weight = n as f64 / (2.0 * n_fake as f64);
        let real_weight = n as f64 / (2.0 * n_real as f64);
        let weights: Vec<f64> = labels
            .iter()
            .map(|&label| if label { fake_weight } else { real_weight })
            .collect();

        let n_features = rows[0].len();
        let tree_params = TreeParams {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split,
            max_features: (n_features as f64).sqrt().ceil() as usize,
        };

        let mut seeder = StdRng::seed_from_u64(seed);
        let tree_seeds: Vec<u64> = (0..self.params.n_estimators)
            .map(|_| seeder.random())
            .collect();

        self.trees = tree_seeds
            .into_par_iter()
            .map(|tree_seed| {
                let mut rng = StdRng::seed_from_u64(tree_seed);
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                DecisionTree::fit(rows, labels, &weights, &bootstrap, tree_params, &mut rng)
            })
            .collect();
        self.n_features = n_features;

        Ok(())
    }

    /// Return `(p_fake, confidence)` for one combined feature row.
    ///
    /// The probability is the mean of the per-tree leaf probabilities; the
    /// confidence is the maximum class posterior.
    pub fn predict_proba(&self, row: &[f64]) -> Result<(f64, f64)> {
        if self.trees.is_empty() {
            return Err(SybilError::not_trained(
                "forest has no fitted trees; train must run first",
            ));
        }
        if row.len() != self.n_features {
            return Err(SybilError::invalid_argument(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        let p_fake = total / self.trees.len() as f64;
        let confidence = p_fake.max(1.0 - p_fake);
        Ok((p_fake, confidence))
    }

    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Number of fitted trees (0 before training).
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}
