use docqa_core::chat::{ChatRole, ChatTurn};
use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{ChatModel, ModelConfig};

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Mistral-hosted chat model. Same chat-completions wire shape as Groq,
/// different host and auth realm, so it gets its own handle.
#[derive(Debug, Clone)]
pub struct MistralChat {
    api_key: String,
    base_url: String,
    config: ModelConfig,
}

impl MistralChat {
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
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatModel for MistralChat {
    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn complete(&self, history: &[ChatTurn], prompt: &str) -> Result<String, AppError> {
        let mut messages: Vec<Message> = history
            .iter()
            .map(|t| Message {
                role: match t.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &t.content,
            })
            .collect();
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        let req = ChatRequest {
            model: &self.config.model_id,
            messages,
            temperature: self.config.temperature,
        };
        let url = format!("{}/chat/completions", self.base_url);
        let resp = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(std::time::Duration::from_secs(60))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("MODEL_INVOCATION_FAILED", "Failed to encode chat request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: ChatResponse = r.into_json().map_err(|e| {
                    AppError::new("MODEL_INVOCATION_FAILED", "Failed to decode chat response")
                        .with_details(e.to_string())
                })?;
                let content = v
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
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
