//! Error types for the ORM system
//!
//! Provides error handling for database operations, model persistence,
//! and query building.

/// Result type alias for ORM operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for ORM operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrmError {
    /// A caller supplied an argument the operation cannot act on,
    /// e.g. an empty insert/update payload or an unparsable order
    /// direction. Surfaced before any statement is issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required record does not exist
    #[error("record not found in table '{table}' for key {id}")]
    NotFound { table: String, id: String },

    /// Primary key is missing or invalid
    #[error("primary key is missing or invalid")]
    MissingPrimaryKey,

    /// Database connection or query error reported by the execution
    /// collaborator. Never retried by this crate.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

// Convert from serde_json errors
impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        OrmError::Serialization(err.to_string())
    }
}
