//! Quality classifier: fitted vectorizer plus forest
//!
//! Trained once, then shared read-only.

use tracing::{debug, info};

use super::forest::RandomForest;
use super::samples::{SampleLabel, TRAINING_SAMPLES};
use super::vectorizer::TfidfVectorizer;
use super::ClassifierError;

pub const MAX_FEATURES: usize = 100;
pub const N_TREES: usize = 50;
pub const SEED: u64 = 42;

/// Class probabilities for one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub bad: f64,
    pub good: f64,
}

impl ClassProbabilities {
    pub fn label(&self) -> SampleLabel {
        if self.good > self.bad {
            SampleLabel::Good
        } else {
            SampleLabel::Bad
        }
    }

    /// Winning class probability as a percentage
    pub fn confidence(&self) -> f64 {
        self.good.max(self.bad) * 100.0
    }
}

#[derive(Debug, Clone)]
pub struct QualityClassifier {
    vectorizer: TfidfVectorizer,
    forest: RandomForest,
}

impl QualityClassifier {
    /// Fit a classifier on labelled code snippets
    pub fn train<S: AsRef<str>>(
        docs: &[S],
        labels: &[SampleLabel],
    ) -> Result<Self, ClassifierError> {
        if docs.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                samples: docs.len(),
                labels: labels.len(),
            });
        }

        let mut vectorizer = TfidfVectorizer::new()
            .with_max_features(MAX_FEATURES)
            .with_ngram_range(1, 2);
        let x = vectorizer.fit_transform(docs)?;
        let y: Vec<usize> = labels.iter().map(|l| l.class_index()).collect();

        let mut forest = RandomForest::new(N_TREES).with_seed(SEED);
        forest.fit(&x, &y)?;

        debug!(
            "Classifier fitted: {} samples, {} terms, {} trees",
            docs.len(),
            vectorizer.len(),
            forest.n_trees()
        );
        Ok(Self { vectorizer, forest })
    }

    /// Train on the built-in sample set
    pub fn bootstrap() -> Result<Self, ClassifierError> {
        let docs: Vec<&str> = TRAINING_SAMPLES.iter().map(|s| s.code).collect();
        let labels: Vec<SampleLabel> = TRAINING_SAMPLES.iter().map(|s| s.label).collect();
        let classifier = Self::train(&docs, &labels)?;
        info!(
            "Quality classifier trained on {} built-in samples",
            TRAINING_SAMPLES.len()
        );
        Ok(classifier)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }

    pub fn predict(&self, code: &str) -> Result<ClassProbabilities, ClassifierError> {
        let row = self.vectorizer.transform(code)?;
        let proba = self.forest.predict_proba(&row)?;
        let class = |label: SampleLabel| proba.get(label.class_index()).copied().unwrap_or(0.0);
        Ok(ClassProbabilities {
            bad: class(SampleLabel::Bad),
            good: class(SampleLabel::Good),
        })
    }
}
