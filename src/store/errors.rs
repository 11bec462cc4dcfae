//! Store error types.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures from the backing data stores
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not open a connection to the relational database
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A statement failed mid-execution
    #[error("Query failed: {0}")]
    Query(String),

    /// The document store rejected the operation
    #[error("Document store error: {0}")]
    Document(String),
}

impl StoreError {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        Self::Connection(err.to_string())
    }

    pub fn query(err: impl std::fmt::Display) -> Self {
        Self::Query(err.to_string())
    }

    pub fn document(err: impl std::fmt::Display) -> Self {
        Self::Document(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_preserve_underlying_text() {
        let err = StoreError::query("Duplicate entry '7' for key 'PRIMARY'");
        assert!(err.to_string().contains("Duplicate entry '7'"));
    }
}
