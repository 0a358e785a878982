//! Error types for Chorus.

use thiserror::Error;

/// Library-level error type for Chorus operations.
#[derive(Error, Debug)]
pub enum ChorusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Unexpected response structure: {0}")]
    Structure(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("RAG error: {0}")]
    Rag(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Chorus operations.
pub type Result<T> = std::result::Result<T, ChorusError>;
