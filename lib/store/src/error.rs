use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by [`crate::VectorStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad arguments or settings, detected before any engine call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The engine rejected or failed a query
    #[error("Error during query: {0}")]
    Query(String),

    /// Any other engine failure, propagated unchanged
    #[error(transparent)]
    Engine(#[from] semstore_core::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        StoreError::Configuration(msg.into())
    }
}
