use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the engine and embedding capabilities.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Tenant already exists: {0}")]
    TenantExists(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid object id: {0}")]
    InvalidId(String),

    #[error("Multi-tenancy mismatch: {0}")]
    MultiTenancy(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
