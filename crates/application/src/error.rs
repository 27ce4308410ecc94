//! Application error types

use ddpman_domain::DomainError;
use thiserror::Error;

use crate::ports::{DdpClientError, WorkspaceError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation or bounds error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The DDP client failed.
    #[error("DDP error: {0}")]
    Ddp(#[from] DdpClientError),

    /// Loading or saving the workspace failed.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
}

impl ApplicationError {
    /// Returns true for bounds errors, which signal a caller bug.
    #[must_use]
    pub const fn is_bounds_error(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_bounds_error())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
