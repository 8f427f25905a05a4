//! Code quality classifier
//!
//! TF-IDF over unigrams and bigrams of the raw source, fed to a seeded
//! random forest trained once on a small fixed sample set.
//!
//! Architecture: source → TfidfVectorizer (100 terms) → RandomForest (50 trees)
//! → class probabilities (bad, good)
//!
//! The textual [`FeatureExtractor`] lives here as well; its features are not
//! model inputs but feed the score composer next to the probabilities.

pub mod features;
pub mod forest;
pub mod model;
pub mod samples;
pub mod vectorizer;

pub use features::FeatureExtractor;
pub use forest::{DecisionTree, RandomForest};
pub use model::{ClassProbabilities, QualityClassifier};
pub use samples::{SampleLabel, TrainingSample, TRAINING_SAMPLES};
pub use vectorizer::TfidfVectorizer;

use thiserror::Error;

/// Errors raised while fitting or querying the classifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("got {samples} samples but {labels} labels")]
    LengthMismatch { samples: usize, labels: usize },

    #[error("training labels contain a single class")]
    SingleClass,

    #[error("empty vocabulary; documents contain no terms")]
    EmptyVocabulary,

    #[error("expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("model has not been fitted")]
    NotFitted,
}
