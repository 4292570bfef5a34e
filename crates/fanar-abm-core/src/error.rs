//! Error types for the registry loader and the chat relay.

use thiserror::Error;

/// Result type alias for chat relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors raised while building an [`AgentRegistry`](crate::AgentRegistry).
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("agent table read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("agent table parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid agent table: {0}")]
    Invalid(String),
}

/// Errors that can occur while relaying a chat to the language-model backend.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("FANAR_API_URL environment variable is not set (or set FANAR_MOCK=1 to enable mock responses)")]
    NotConfigured,

    #[error("Fanar API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Fanar API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Fanar API response parse failed: {0}")]
    MalformedResponse(String),
}
