//! Error types for interlink.

/// Errors that can occur while configuring the chunker or measuring output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid character limit (must be > 0).
    #[error("invalid max chunk size: {0} characters (must be > 0)")]
    InvalidChunkSize(usize),

    /// Invalid word limit (must be > 0).
    #[error("invalid max chunk words: {0} (must be > 0)")]
    InvalidChunkWords(usize),

    /// A value could not be serialized to JSON.
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for interlink operations.
pub type Result<T> = std::result::Result<T, Error>;
