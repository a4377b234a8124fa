use docqa_core::chat::{ChatRole, ChatTurn};
use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{ChatModel, ModelConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini-hosted chat model, `generateContent` wire shape. Gemini calls the
/// assistant role "model" and nests text under content parts.
#[derive(Debug, Clone)]
pub struct GeminiChat {
    api_key: String,
    base_url: String,
    config: ModelConfig,
}

impl GeminiChat {
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            config,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl ChatModel for GeminiChat {
    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn complete(&self, history: &[ChatTurn], prompt: &str) -> Result<String, AppError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|t| Content {
                role: match t.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                },
                parts: vec![Part { text: &t.content }],
            })
            .collect();
        contents.push(Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        });

        let req = GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.config.model_id, self.api_key
        );
        let resp = ureq::post(&url)
            .timeout(std::time::Duration::from_secs(60))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("MODEL_INVOCATION_FAILED", "Failed to encode chat request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: GenerateContentResponse = r.into_json().map_err(|e| {
                    AppError::new("MODEL_INVOCATION_FAILED", "Failed to decode chat response")
                        .with_details(e.to_string())
                })?;
                let content = v
                    .candidates
                    .into_iter()
                    .next()
                    .map(|c| {
                        c.content
                            .parts
                            .into_iter()
                            .map(|p| p.text)
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(AppError::new(
                        "MODEL_INVOCATION_FAILED",
                        "Chat response was empty",
                    ));
                }
                Ok(content)
            }
            Ok(r) => Err(
                AppError::new("MODEL_INVOCATION_FAILED", "Chat request failed").with_details(
                    format!("model={}; status={}", self.config.model_id, r.status()),
                ),
            ),
            Err(e) => Err(
                AppError::new("MODEL_INVOCATION_FAILED", "Failed to call chat endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
