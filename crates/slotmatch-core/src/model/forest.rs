//! Bagged ensemble of classification trees.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use super::tree::{DecisionTree, TreeParams};
use crate::config::ModelConfig;

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `config.n_estimators` trees on bootstrap resamples of the rows.
    ///
    /// The generator is seeded from `config.seed`, so identical input and
    /// config always produce the same forest.
    pub fn fit(rows: &[Vec<f64>], labels: &[bool], config: &ModelConfig) -> Self {
        let mut rng = Mcg128Xsl64::seed_from_u64(config.seed);

        let n_samples = rows.len();
        let n_features = rows.first().map_or(0, Vec::len);
        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let trees = (0..config.n_estimators)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                DecisionTree::fit(rows, labels, &bootstrap, &params, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Mean of the per-tree positive-class probabilities.
    pub fn predict_probability(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_probability(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}
