//! Random forest of CART classification trees
//!
//! Trees are grown on bootstrap samples with Gini impurity until every leaf
//! is pure or no feature separates its samples. At each node a random
//! subset of `floor(sqrt(n_features))` non-constant features is searched.
//! Probabilities are the mean of the leaf class distributions.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ClassifierError;

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        /// Class fractions of the training samples in this leaf
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

fn histogram(y: &[usize], samples: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in samples {
        counts[y[i]] += 1;
    }
    counts
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Strictly better than the current best; earlier candidates win ties
fn improves(best: &Option<SplitCandidate>, impurity: f64) -> bool {
    match best {
        Some(current) => impurity < current.impurity,
        None => true,
    }
}

/// Best threshold on one feature, or None when the feature is constant here
fn best_split_on_feature(
    x: &[Vec<f64>],
    y: &[usize],
    samples: &[usize],
    feature: usize,
    n_classes: usize,
) -> Option<SplitCandidate> {
    let mut order: Vec<usize> = samples.to_vec();
    order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

    let n = order.len();
    let mut right = histogram(y, &order, n_classes);
    let mut left = vec![0; n_classes];
    let mut best: Option<SplitCandidate> = None;

    for pos in 0..n - 1 {
        let label = y[order[pos]];
        left[label] += 1;
        right[label] -= 1;

        let here = x[order[pos]][feature];
        let next = x[order[pos + 1]][feature];
        if next <= here {
            continue;
        }

        let n_left = (pos + 1) as f64;
        let n_right = (n - pos - 1) as f64;
        let impurity = (n_left * gini(&left) + n_right * gini(&right)) / n as f64;
        if improves(&best, impurity) {
            best = Some(SplitCandidate {
                feature,
                threshold: here + (next - here) / 2.0,
                impurity,
            });
        }
    }
    best
}

/// A single fully grown classification tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    /// Grow a tree over `samples` (row indices into `x`, repeats allowed)
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        samples: &[usize],
        n_classes: usize,
        max_features: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        let root = grow(x, y, samples, n_classes, n_features, max_features, rng);
        Self { root }
    }

    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { distribution } => return distribution.clone(),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    #[cfg(test)]
    fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => count += 1,
                TreeNode::Split { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }
}

fn leaf(counts: &[usize]) -> TreeNode {
    let total: usize = counts.iter().sum();
    let distribution = counts
        .iter()
        .map(|&c| if total > 0 { c as f64 / total as f64 } else { 0.0 })
        .collect();
    TreeNode::Leaf { distribution }
}

fn grow(
    x: &[Vec<f64>],
    y: &[usize],
    samples: &[usize],
    n_classes: usize,
    n_features: usize,
    max_features: usize,
    rng: &mut ChaCha8Rng,
) -> TreeNode {
    let counts = histogram(y, samples, n_classes);
    let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if samples.len() < 2 || is_pure {
        return leaf(&counts);
    }

    // Draw features until `max_features` non-constant ones have been searched
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);
    let mut searched = 0;
    let mut best: Option<SplitCandidate> = None;
    for feature in features {
        if searched >= max_features {
            break;
        }
        let Some(candidate) = best_split_on_feature(x, y, samples, feature, n_classes) else {
            continue;
        };
        searched += 1;
        if improves(&best, candidate.impurity) {
            best = Some(candidate);
        }
    }

    let Some(split) = best else {
        return leaf(&counts);
    };

    let (left, right): (Vec<usize>, Vec<usize>) = samples
        .iter()
        .copied()
        .partition(|&i| x[i][split.feature] <= split.threshold);

    TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(x, y, &left, n_classes, n_features, max_features, rng)),
        right: Box::new(grow(x, y, &right, n_classes, n_features, max_features, rng)),
    }
}

/// Bagged ensemble of [`DecisionTree`]s
#[derive(Debug, Clone)]
pub struct RandomForest {
    n_trees: usize,
    seed: u64,
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(n_trees: usize) -> Self {
        Self {
            n_trees: n_trees.max(1),
            seed: 0,
            trees: Vec::new(),
            n_features: 0,
            n_classes: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Fit on dense rows `x` with class labels `y` in `0..n_classes`
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[usize]) -> Result<(), ClassifierError> {
        if x.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        if x.len() != y.len() {
            return Err(ClassifierError::LengthMismatch {
                samples: x.len(),
                labels: y.len(),
            });
        }
        let n_features = x[0].len();
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(ClassifierError::DimensionMismatch {
                expected: n_features,
                found: row.len(),
            });
        }
        let n_classes = y.iter().max().map_or(0, |m| m + 1);
        let mut distinct = y.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(ClassifierError::SingleClass);
        }

        let max_features = ((n_features as f64).sqrt() as usize).max(1);
        let n = x.len();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        self.trees = (0..self.n_trees)
            .map(|_| {
                let mut tree_rng = ChaCha8Rng::seed_from_u64(rng.random());
                let samples: Vec<usize> = (0..n).map(|_| tree_rng.random_range(0..n)).collect();
                DecisionTree::fit(x, y, &samples, n_classes, max_features, &mut tree_rng)
            })
            .collect();
        self.n_features = n_features;
        self.n_classes = n_classes;
        Ok(())
    }

    /// Mean class distribution over all trees
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted);
        }
        if row.len() != self.n_features {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (total, p) in proba.iter_mut().zip(tree.predict_proba(row)) {
                *total += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}
