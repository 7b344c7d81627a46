//! Error types for the storage layer.

use blog_core::{AuthorId, PostId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// MongoDB server error code for a unique index violation.
pub(crate) const DUPLICATE_KEY: i32 = 11000;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Author not found.
    #[error("author not found: {0}")]
    AuthorNotFound(AuthorId),

    /// Blog post not found.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Another author already holds this username.
    #[error("username already taken: {0}")]
    UserNameTaken(String),

    /// A stored document could not be converted to a domain type.
    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// True for failures that map to "entity does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AuthorNotFound(_) | Self::PostNotFound(_))
    }
}

/// True when a driver error reports a unique index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(StoreError::AuthorNotFound(AuthorId::new()).is_not_found());
        assert!(StoreError::PostNotFound(PostId::new()).is_not_found());
        assert!(!StoreError::UserNameTaken("x".into()).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = StoreError::UserNameTaken("ada".to_string());
        assert_eq!(err.to_string(), "username already taken: ada");
    }
}
