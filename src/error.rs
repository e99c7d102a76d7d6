//! Error types for podium

use thiserror::Error;

/// Result type alias for podium operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in podium
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio capture error
    #[error("audio error: {0}")]
    Audio(String),

    /// Intent detection error (hosted API)
    #[error("intent error: {0}")]
    Intent(String),

    /// Tool registration or execution error
    #[error("tool error: {0}")]
    Tool(String),

    /// Presentation state error
    #[error("deck error: {0}")]
    Deck(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
