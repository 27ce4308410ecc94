//! Save workspace use case.

use std::path::PathBuf;

use ddpman_domain::{ConnectionRegistry, WorkspaceDocument};
use tracing::info;

use crate::ports::{WorkspaceError, WorkspaceRepository};

/// Use case for persisting a registry snapshot.
pub struct SaveWorkspace<R: WorkspaceRepository> {
    repository: R,
    path: PathBuf,
}

impl<R: WorkspaceRepository> SaveWorkspace<R> {
    /// Creates a new `SaveWorkspace` use case for the document at `path`.
    #[must_use]
    pub fn new(repository: R, path: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            path: path.into(),
        }
    }

    /// Writes the snapshot at the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    pub async fn execute(&self, snapshot: &ConnectionRegistry) -> Result<(), WorkspaceError> {
        let document = WorkspaceDocument::new(snapshot.clone());
        self.repository.save(&self.path, &document).await?;
        info!(
            path = %self.path.display(),
            connections = snapshot.len(),
            "workspace saved"
        );
        Ok(())
    }
}
