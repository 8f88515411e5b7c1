//! Zero-mean/unit-variance standardization of the numeric features.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SybilError};
use crate::features::FEATURE_COUNT;

/// Standardizes numeric features to z-scores.
///
/// `fit` is the only mutation point and must run exactly once per model
/// lifecycle; `transform` is a pure function over the frozen mean and
/// standard deviation afterward. A feature with zero variance at fit time
/// transforms to 0 rather than dividing by zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and freeze per-feature mean and standard deviation.
    pub fn fit(&mut self, rows: &[[f64; FEATURE_COUNT]]) -> Result<()> {
        if self.fitted {
            return Err(SybilError::invalid_operation(
                "scaler is already fitted; fit must be called exactly once",
            ));
        }
        if rows.is_empty() {
            return Err(SybilError::invalid_argument(
                "cannot fit scaler on an empty matrix",
            ));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut sum_squared = vec![0.0; FEATURE_COUNT];

        for row in rows {
            for (column, &value) in row.iter().enumerate() {
                mean[column] += value;
                sum_squared[column] += value * value;
            }
        }
        for value in &mut mean {
            *value /= n;
        }

        let std_dev = mean
            .iter()
            .zip(sum_squared.iter())
            .map(|(&m, &sq)| {
                let variance = (sq / n) - (m * m);
                variance.max(0.0).sqrt()
            })
            .collect();

        self.mean = mean;
        self.std_dev = std_dev;
        self.fitted = true;
        Ok(())
    }

    /// Map one feature row to z-scores over the frozen statistics.
    pub fn transform(&self, values: &[f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT]> {
        if !self.fitted {
            return Err(SybilError::not_trained("scaler has not been fitted"));
        }

        let mut scaled = [0.0; FEATURE_COUNT];
        for (column, &value) in values.iter().enumerate() {
            let sd = self.std_dev[column];
            scaled[column] = if sd > 0.0 {
                (value - self.mean[column]) / sd
            } else {
                0.0
            };
        }
        Ok(scaled)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Frozen per-feature means. Empty before `fit`.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Frozen per-feature standard deviations. Empty before `fit`.
    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }
}
