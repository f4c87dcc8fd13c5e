//! Frozen model artifacts restored from JSON: TF-IDF vectorizer, standard
//! scaler and regressors. Nothing here trains; everything is read-only after load.

pub mod regressor;
pub mod tfidf;

use thiserror::Error;

pub use regressor::{Regressor, StandardScaler};
pub use tfidf::TfidfVectorizer;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("model produced a non-finite prediction")]
    NonFinite,
}
