use docqa_core::chat::{ChatRole, ChatTurn};
use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{ChatModel, ModelConfig};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq-hosted chat model, OpenAI chat-completions wire shape.
#[derive(Debug, Clone)]
pub struct GroqChat {
    api_key: String,
    base_url: String,
    config: ModelConfig,
}

impl GroqChat {
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
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

impl ChatModel for GroqChat {
    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn complete(&self, history: &[ChatTurn], prompt: &str) -> Result<String, AppError> {
        let mut messages: Vec<WireMessage> = history
            .iter()
            .map(|t| WireMessage {
                role: role_str(t.role),
                content: &t.content,
            })
            .collect();
        messages.push(WireMessage {
            role: "user",
            content: prompt,
        });

        let req = ChatCompletionRequest {
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
                let v: ChatCompletionResponse = r.into_json().map_err(|e| {
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
