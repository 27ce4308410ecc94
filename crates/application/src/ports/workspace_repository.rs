//! Workspace repository port.

use std::future::Future;
use std::path::Path;

use ddpman_domain::WorkspaceDocument;

/// Error type for workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// No workspace document at the given path.
    #[error("Workspace not found at: {0}")]
    NotFound(String),

    /// Schema version mismatch.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        /// Highest supported schema version.
        expected: u32,
        /// Found schema version.
        found: u32,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),
}

/// Repository for the persisted workspace document.
pub trait WorkspaceRepository: Send + Sync {
    /// Loads the workspace document stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no document, or another error if the
    /// document cannot be read or parsed.
    fn load(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<WorkspaceDocument, WorkspaceError>> + Send;

    /// Writes the workspace document to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(
        &self,
        path: &Path,
        document: &WorkspaceDocument,
    ) -> impl Future<Output = Result<(), WorkspaceError>> + Send;
}
