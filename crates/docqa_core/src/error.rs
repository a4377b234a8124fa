use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape used across both crates.
///
/// Every pipeline stage returns this instead of panicking; the action
/// boundary (`process`/`ask`) converts it to a generic user-facing message
/// while keeping `details` for the log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    /// Stable machine-readable code, e.g. `MODEL_NOT_FOUND`.
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    /// True only for transient failures (network) worth re-trying by hand.
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
