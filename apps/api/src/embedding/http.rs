//! HTTP backend for a text-embeddings-inference compatible server
//! (`POST /embed {"inputs": [...], "model": "..."}` → `[[f32, ...], ...]`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::embedding::{Embedder, EmbeddingError};

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    model: &'a str,
    truncate: bool,
}

#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: embed_endpoint(base_url),
            model,
        })
    }
}

fn embed_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/embed") {
        base.to_string()
    } else {
        format!("{base}/embed")
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest {
                inputs: texts,
                model: &self.model,
                truncate: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Embedding server returned {status}: {message}");
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let embeddings: Vec<Vec<f32>> = response.json().await?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                got: embeddings.len(),
            });
        }

        debug!(
            "Embedded {} texts with {} ({} dims)",
            texts.len(),
            self.model,
            embeddings.first().map_or(0, Vec::len)
        );
        Ok(embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_endpoint_appends_path_once() {
        assert_eq!(embed_endpoint("http://localhost:8081"), "http://localhost:8081/embed");
        assert_eq!(embed_endpoint("http://localhost:8081/"), "http://localhost:8081/embed");
        assert_eq!(
            embed_endpoint("http://localhost:8081/embed"),
            "http://localhost:8081/embed"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let inputs = ["expected", "candidate"];
        let body = serde_json::to_value(EmbedRequest {
            inputs: &inputs,
            model: "all-mpnet-base-v2",
            truncate: true,
        })
        .unwrap();
        assert_eq!(body["inputs"][1], "candidate");
        assert_eq!(body["model"], "all-mpnet-base-v2");
        assert_eq!(body["truncate"], true);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_http_error() {
        let embedder = HttpEmbedder::new(
            "http://127.0.0.1:1",
            "all-mpnet-base-v2".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = embedder.embed_batch(&["hello"]).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Http(_)));
        assert_eq!(embedder.model_name(), "all-mpnet-base-v2");
    }
}
