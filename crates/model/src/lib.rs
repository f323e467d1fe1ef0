//! Trained classifier artifact for the triage pipeline.
//!
//! This crate owns the model side of the system: a Bernoulli naive Bayes
//! multi-class classifier over a fixed, ordered symptom vocabulary. The
//! artifact is a JSON file carrying the class labels, the vocabulary and the
//! fitted parameters together, so a model can never be served against a
//! vocabulary it was not trained on.
//!
//! Training is a one-shot offline batch job (`fit` over a labelled dataset);
//! the request path only ever calls [`Classifier::predict_proba`].

pub mod classifier;
pub mod train;

use std::path::PathBuf;

use thiserror::Error;

pub use classifier::Classifier;
pub use train::{fit, load_dataset, TrainingCase};

/// Errors returned by the model crate.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write model artifact {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    ArtifactParse(#[from] serde_json::Error),

    #[error("malformed model artifact: {0}")]
    MalformedArtifact(String),

    #[error("feature vector length {got} does not match vocabulary size {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("training dataset is empty")]
    EmptyDataset,

    #[error("invalid training dataset: {0}")]
    InvalidDataset(String),

    #[error("failed to read training dataset {}: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("training dataset schema mismatch at {field}: {source}")]
    DatasetParse {
        field: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
