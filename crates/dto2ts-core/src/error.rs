//! Error types for declaration generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation operations
///
/// Only whole-traversal failures are represented here. Problems confined to a
/// single field or referenced class degrade to the `any` token instead.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The root class could not be resolved in any allowed scope
    #[error("root class not found: {0}")]
    RootNotFound(String),

    /// The root resolved but produced no declaration (interface, annotation, ...)
    #[error("nothing to generate for {0}")]
    NothingToGenerate(String),

    /// The class graph handed over by the host is malformed
    #[error("invalid class graph: {0}")]
    InvalidClassGraph(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error while reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The generation pool no longer accepts work
    #[error("generation pool is shut down")]
    PoolShutdown,

    /// A queued generation job panicked or was aborted
    #[error("generation task failed: {0}")]
    TaskFailed(String),
}

impl GenerateError {
    /// Returns true when the error means "no result" rather than a broken input
    pub fn is_nothing_to_generate(&self) -> bool {
        matches!(
            self,
            GenerateError::RootNotFound(_) | GenerateError::NothingToGenerate(_)
        )
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(err: toml::de::Error) -> Self {
        GenerateError::ConfigError(err.to_string())
    }
}
