//! Error types for Insights Bridge

use thiserror::Error;

/// Main error type for Insights Bridge operations
#[derive(Error, Debug)]
pub enum InsightsError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or DNS failure while calling the proxy or the upstream API
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success status from the proxy or the upstream API
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Response is missing the flat `results[0].events` list
    #[error("Unsupported response shape: {0}")]
    InvalidResponseShape(String),

    /// Required connection parameter is missing or empty
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InsightsError {
    /// Returns true if this error should be logged at error level
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            InsightsError::Transport(_)
                | InsightsError::UpstreamStatus(_)
                | InsightsError::Server(_)
                | InsightsError::Io(_)
        )
    }

    /// Returns true if this error is caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        match self {
            InsightsError::MissingInput(_) | InsightsError::InvalidResponseShape(_) => true,
            InsightsError::UpstreamStatus(code) => (400..500).contains(code),
            _ => false,
        }
    }

    /// Returns the HTTP status code that represents this error
    pub fn status_code(&self) -> u16 {
        match self {
            InsightsError::UpstreamStatus(code) => *code,
            InsightsError::Transport(_) => 502,
            InsightsError::MissingInput(_) => 400,
            InsightsError::InvalidResponseShape(_) => 422,
            _ => 500,
        }
    }
}

/// Result type alias using InsightsError
pub type Result<T> = std::result::Result<T, InsightsError>;
