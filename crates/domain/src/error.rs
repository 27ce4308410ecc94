//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or tree mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided server URL is invalid or uses an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A name entered for a collection, folder or endpoint is rejected.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A sibling with the same name and node type already exists.
    #[error("name already exists: {0}")]
    DuplicateName(String),

    /// A save target path did not select any collection.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// An index addressed past the end of a list.
    #[error("{what} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// What kind of list was addressed.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// No connection carries the given title.
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),
}

impl DomainError {
    /// Builds an `IndexOutOfBounds` error.
    #[must_use]
    pub const fn out_of_bounds(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { what, index, len }
    }

    /// Returns true for errors that signal a caller bug rather than bad user input.
    #[must_use]
    pub const fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::ConnectionNotFound(_)
        )
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = DomainError::out_of_bounds("collection", 4, 2);
        assert_eq!(err.to_string(), "collection index 4 out of bounds (len 2)");
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_validation_errors_are_not_bounds_errors() {
        assert!(!DomainError::DuplicateName("Users".into()).is_bounds_error());
        assert!(!DomainError::InvalidUrl("http://x".into()).is_bounds_error());
    }
}
