//! Single classification tree used inside the forest ensemble.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A binary classification tree fit on weighted gini impurity.
///
/// Leaves store the weighted fraction of fake-labeled samples, so a tree
/// prediction is already a probability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<Box<TreeNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode {
    /// Feature index for split (-1 for leaf).
    feature_idx: i32,
    /// Threshold value for split.
    threshold: f64,
    /// Weighted fake fraction (used directly for leaf nodes).
    value: f64,
    /// Left child (feature <= threshold).
    left: Option<Box<TreeNode>>,
    /// Right child.
    right: Option<Box<TreeNode>>,
}

/// Split-search limits for one tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Features sampled per split (sqrt of the total in the forest).
    pub max_features: usize,
}

impl DecisionTree {
    /// Fit a tree to the rows selected by `indices`.
    ///
    /// `weights` are the per-sample class weights; `indices` is the
    /// bootstrap sample drawn by the forest.
    pub(crate) fn fit<R: Rng>(
        rows: &[Vec<f64>],
        labels: &[bool],
        weights: &[f64],
        indices: &[usize],
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let root = if indices.is_empty() {
            None
        } else {
            Self::build_node(rows, labels, weights, indices, 0, params, rng)
        };
        DecisionTree { root }
    }

    /// Predict the fake probability for one combined feature row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        match &self.root {
            Some(root) => Self::predict_node(root, row),
            None => 0.0,
        }
    }

    fn node_class_weights(labels: &[bool], weights: &[f64], indices: &[usize]) -> (f64, f64) {
        let mut total = 0.0;
        let mut fake = 0.0;
        for &i in indices {
            total += weights[i];
            if labels[i] {
                fake += weights[i];
            }
        }
        (total, fake)
    }

    fn gini(fake_weight: f64, total_weight: f64) -> f64 {
        if total_weight <= 0.0 {
            return 0.0;
        }
        let p = fake_weight / total_weight;
        2.0 * p * (1.0 - p)
    }

    fn build_node<R: Rng>(
        rows: &[Vec<f64>],
        labels: &[bool],
        weights: &[f64],
        indices: &[usize],
        depth: usize,
        params: TreeParams,
        rng: &mut R,
    ) -> Option<Box<TreeNode>> {
        let (total_weight, fake_weight) = Self::node_class_weights(labels, weights, indices);
        let p_fake = fake_weight / total_weight;

        let leaf = |value: f64| {
            Some(Box::new(TreeNode {
                feature_idx: -1,
                threshold: 0.0,
                value,
                left: None,
                right: None,
            }))
        };

        // Pure node, too deep, or too small to split.
        if depth >= params.max_depth
            || indices.len() < params.min_samples_split
            || p_fake <= 0.0
            || p_fake >= 1.0
        {
            return leaf(p_fake);
        }

        match Self::find_best_split(rows, labels, weights, indices, params.max_features, rng) {
            Some((feature_idx, threshold)) => {
                let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| rows[i][feature_idx] <= threshold);
                if left_indices.is_empty() || right_indices.is_empty() {
                    return leaf(p_fake);
                }

                let left = Self::build_node(
                    rows,
                    labels,
                    weights,
                    &left_indices,
                    depth + 1,
                    params,
                    rng,
                );
                let right = Self::build_node(
                    rows,
                    labels,
                    weights,
                    &right_indices,
                    depth + 1,
                    params,
                    rng,
                );

                Some(Box::new(TreeNode {
                    feature_idx: feature_idx as i32,
                    threshold,
                    value: p_fake,
                    left,
                    right,
                }))
            }
            None => leaf(p_fake),
        }
    }

    /// Search a random feature subset for the split with the best weighted
    /// gini gain. Returns `None` when no split improves on the parent.
    fn find_best_split<R: Rng>(
        rows: &[Vec<f64>],
        labels: &[bool],
        weights: &[f64],
        indices: &[usize],
        max_features: usize,
        rng: &mut R,
    ) -> Option<(usize, f64)> {
        let n_features = rows[0].len();
        let sample_size = max_features.clamp(1, n_features);
        let candidates = rand::seq::index::sample(rng, n_features, sample_size);

        let (total_weight, fake_weight) = Self::node_class_weights(labels, weights, indices);
        let parent_gini = Self::gini(fake_weight, total_weight);

        let mut best_gain = 1e-12;
        let mut best_split = None;

        for feature_idx in candidates.iter() {
            let mut values: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (rows[i][feature_idx], i))
                .collect();
            values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            // One pass over the sorted values, accumulating the left-side
            // class weights; a boundary only exists where the value changes.
            let mut left_weight = 0.0;
            let mut left_fake = 0.0;
            for i in 1..values.len() {
                let (prev_value, prev_idx) = values[i - 1];
                left_weight += weights[prev_idx];
                if labels[prev_idx] {
                    left_fake += weights[prev_idx];
                }
                if values[i].0 <= prev_value {
                    continue;
                }

                let right_weight = total_weight - left_weight;
                let right_fake = fake_weight - left_fake;
                let weighted_impurity = (left_weight * Self::gini(left_fake, left_weight)
                    + right_weight * Self::gini(right_fake, right_weight))
                    / total_weight;
                let gain = parent_gini - weighted_impurity;

                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, (prev_value + values[i].0) / 2.0));
                }
            }
        }

        best_split
    }

    fn predict_node(node: &TreeNode, row: &[f64]) -> f64 {
        if node.feature_idx < 0 {
            return node.value;
        }

        let feature_value = row
            .get(node.feature_idx as usize)
            .copied()
            .unwrap_or_default();
        if feature_value <= node.threshold {
            match &node.left {
                Some(left) => Self::predict_node(left, row),
                None => node.value,
            }
        } else {
            match &node.right {
                Some(right) => Self::predict_node(right, row),
                None => node.value,
            }
        }
    }
}
