use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::ollama::OllamaClient;
use crate::similarity;

/// Remote embedder backed by a local Ollama daemon. The embedding model is
/// bound at construction so corpus and query vectors always come from the
/// same model.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: OllamaClient,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, input: &str) -> Result<Vec<f32>, AppError> {
        // Keep requests bounded. Chunking enforces reasonable sizes, but
        // guard anyway; the cut must stay on a char boundary.
        let mut cut = input.len().min(12_000);
        while !input.is_char_boundary(cut) {
            cut -= 1;
        }
        let prompt = &input[..cut];

        let url = format!("{}/api/embeddings", self.client.base_url());
        let req = EmbeddingsRequest {
            model: &self.model,
            prompt,
        };
        let resp = ureq::post(&url)
            .timeout(std::time::Duration::from_secs(10))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("EMBEDDINGS_FAILED", "Failed to encode embeddings request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: EmbeddingsResponse = r.into_json().map_err(|e| {
                    AppError::new("EMBEDDINGS_FAILED", "Failed to decode embeddings response")
                        .with_details(e.to_string())
                })?;
                if v.embedding.is_empty() {
                    return Err(AppError::new(
                        "EMBEDDINGS_FAILED",
                        "Embeddings response was empty",
                    ));
                }
                let mut embedding = v.embedding;
                if similarity::normalize(&mut embedding) == 0.0 {
                    return Err(AppError::new(
                        "EMBEDDINGS_FAILED",
                        "Embeddings response was a zero vector",
                    ));
                }
                Ok(embedding)
            }
            Ok(r) => Err(
                AppError::new("EMBEDDINGS_FAILED", "Embeddings request failed")
                    .with_details(format!("model={}; status={}", self.model, r.status())),
            ),
            Err(e) => Err(
                AppError::new("EMBEDDINGS_FAILED", "Failed to call embeddings endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
