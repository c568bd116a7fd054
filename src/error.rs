use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the moderation backend. The controller collapses all
/// of them into one user-facing message; the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API base URL cannot hold path segments: {0}")]
    InvalidBaseUrl(String),

    #[error("backend answered HTTP {0}")]
    Status(StatusCode),

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
