//! Binary classification tree (CART, Gini impurity).

use rand::seq::SliceRandom;
use rand::Rng;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Non-constant features examined per split
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        /// Fraction of positive samples that reached this leaf
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

/// A fitted tree stored as a flat node arena, root at index 0.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree on the rows named by `sample` (duplicates allowed).
    pub fn fit<R: Rng + ?Sized>(
        rows: &[Vec<f64>],
        labels: &[bool],
        sample: &[usize],
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(rows, labels, sample.to_vec(), 0, params, rng);
        tree
    }

    /// Probability that `row` belongs to the positive class.
    pub fn predict_probability(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, index: usize) -> usize {
        match &self.nodes[index] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + self.depth_from(*left).max(self.depth_from(*right)),
        }
    }

    fn grow<R: Rng + ?Sized>(
        &mut self,
        rows: &[Vec<f64>],
        labels: &[bool],
        sample: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> usize {
        let positives = sample.iter().filter(|&&i| labels[i]).count();
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            probability: if sample.is_empty() {
                0.0
            } else {
                positives as f64 / sample.len() as f64
            },
        });

        let pure = positives == 0 || positives == sample.len();
        if pure || depth >= params.max_depth || sample.len() < params.min_samples_split {
            return index;
        }

        let Some(split) = Self::best_split(rows, labels, &sample, positives, params, rng) else {
            return index;
        };

        let (left_sample, right_sample): (Vec<usize>, Vec<usize>) = sample
            .iter()
            .partition(|&&i| rows[i][split.feature] <= split.threshold);

        let left = self.grow(rows, labels, left_sample, depth + 1, params, rng);
        let right = self.grow(rows, labels, right_sample, depth + 1, params, rng);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    /// Lowest weighted-Gini split over `max_features` non-constant features,
    /// visited in random order. Keeps visiting further features while none of
    /// the examined ones lowers impurity. `None` if no feature does.
    fn best_split<R: Rng + ?Sized>(
        rows: &[Vec<f64>],
        labels: &[bool],
        sample: &[usize],
        positives: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Option<SplitCandidate> {
        let n_features = rows.first().map_or(0, Vec::len);
        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(rng);

        let total = sample.len();
        let parent = gini(positives, total);
        let mut best: Option<SplitCandidate> = None;
        let mut examined = 0;

        for feature in features {
            if examined >= params.max_features && best.is_some() {
                break;
            }

            let mut values: Vec<(f64, bool)> = sample
                .iter()
                .map(|&i| (rows[i][feature], labels[i]))
                .collect();
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (first, last) = (values[0].0, values[values.len() - 1].0);
            if first == last {
                continue;
            }
            examined += 1;

            let mut left_positives = 0;
            for i in 0..values.len() - 1 {
                if values[i].1 {
                    left_positives += 1;
                }
                if values[i].0 == values[i + 1].0 {
                    continue;
                }

                let left_total = i + 1;
                let right_total = total - left_total;
                let impurity = (left_total as f64 * gini(left_positives, left_total)
                    + right_total as f64 * gini(positives - left_positives, right_total))
                    / total as f64;

                let improves = impurity < parent - f64::EPSILON;
                let better = best.as_ref().map_or(true, |b| impurity < b.impurity);
                if improves && better {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: (values[i].0 + values[i + 1].0) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 5,
            min_samples_split: 2,
            max_features: 2,
        }
    }

    #[test]
    fn separable_data_is_learned_exactly() {
        let rows: Vec<Vec<f64>> = (0..10).map(|h| vec![h as f64, 0.0]).collect();
        let labels: Vec<bool> = (0..10).map(|h| h >= 5).collect();
        let sample: Vec<usize> = (0..10).collect();
        let mut rng = Mcg128Xsl64::seed_from_u64(42);

        let tree = DecisionTree::fit(&rows, &labels, &sample, &params(), &mut rng);
        assert_eq!(tree.predict_probability(&[2.0, 0.0]), 0.0);
        assert_eq!(tree.predict_probability(&[8.0, 0.0]), 1.0);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn pure_sample_is_single_leaf() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec![true, true, true];
        let mut rng = Mcg128Xsl64::seed_from_u64(7);

        let tree = DecisionTree::fit(&rows, &labels, &[0, 1, 2], &params(), &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_probability(&[100.0]), 1.0);
    }

    #[test]
    fn depth_limit_is_respected() {
        // Alternating labels need many splits to separate.
        let rows: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let labels: Vec<bool> = (0..64).map(|i| i % 2 == 0).collect();
        let sample: Vec<usize> = (0..64).collect();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let shallow = TreeParams {
            max_depth: 3,
            ..params()
        };

        let tree = DecisionTree::fit(&rows, &labels, &sample, &shallow, &mut rng);
        assert!(tree.depth() <= 3);
        let p = tree.predict_probability(&[10.0]);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn constant_features_yield_leaf() {
        let rows = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let labels = vec![true, false];
        let mut rng = Mcg128Xsl64::seed_from_u64(3);

        let tree = DecisionTree::fit(&rows, &labels, &[0, 1], &params(), &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_probability(&[1.0, 1.0]), 0.5);
    }
}
