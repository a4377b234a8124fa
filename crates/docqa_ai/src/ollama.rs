use docqa_core::error::AppError;

/// Client for a local Ollama daemon, strictly limited to `127.0.0.1`.
///
/// Remote embedding hosts are refused at construction so document text never
/// leaves the machine by accident.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://127.0.0.1:") && base_url != "http://127.0.0.1" {
            return Err(AppError::new(
                "REMOTE_NOT_ALLOWED",
                "Ollama base URL must be localhost (127.0.0.1)",
            )
            .with_details(format!("base_url={base_url}")));
        }
        if let Some(rest) = base_url.strip_prefix("http://127.0.0.1:") {
            // Port must be digits only; anything else is a bypass attempt.
            if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AppError::new(
                    "REMOTE_NOT_ALLOWED",
                    "Ollama base URL must be localhost (127.0.0.1)",
                )
                .with_details(format!("base_url={base_url}")));
            }
        }

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = ureq::get(&url)
            .timeout(std::time::Duration::from_millis(800))
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("EMBEDDINGS_FAILED", "Ollama health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(AppError::new(
                "EMBEDDINGS_FAILED",
                "Failed to reach Ollama on 127.0.0.1",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
