//! Sentence embeddings for semantic answer similarity.
//!
//! `Embedder` is the seam: the service ships an HTTP backend for a
//! sentence-transformers model server, tests plug in their own.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpEmbedder;

/// Pretrained sentence-transformers model the scoring was calibrated against.
pub const DEFAULT_MODEL: &str = "all-mpnet-base-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("no embedding backend configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding server returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("expected {expected} embeddings, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("embeddings differ in dimension ({0} vs {1})")]
    DimensionMismatch(usize, usize),
}

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds every text, preserving order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn model_name(&self) -> &str;
}

/// Backend used when no embedding server is configured: every call fails,
/// so similarity scoring always takes its fallback path.
pub struct UnconfiguredEmbedder;

#[async_trait]
impl Embedder for UnconfiguredEmbedder {
    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::NotConfigured)
    }

    fn model_name(&self) -> &str {
        "unconfigured"
    }
}

/// Cosine similarity in [-1, 1]; zero when either vector has no length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch(a.len(), b.len()));
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}
