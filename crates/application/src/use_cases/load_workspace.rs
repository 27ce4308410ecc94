//! Load workspace use case.

use std::path::PathBuf;

use ddpman_domain::ConnectionRegistry;
use tracing::info;

use crate::ports::{WorkspaceError, WorkspaceRepository};

/// Use case for reading the persisted registry.
///
/// A missing document is not an error: it yields an empty registry, which
/// the store's `Initialize` intent then seeds.
pub struct LoadWorkspace<R: WorkspaceRepository> {
    repository: R,
    path: PathBuf,
}

impl<R: WorkspaceRepository> LoadWorkspace<R> {
    /// Creates a new `LoadWorkspace` use case for the document at `path`.
    #[must_use]
    pub fn new(repository: R, path: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            path: path.into(),
        }
    }

    /// Loads the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read, parsed,
    /// or has a newer schema version.
    pub async fn execute(&self) -> Result<ConnectionRegistry, WorkspaceError> {
        match self.repository.load(&self.path).await {
            Ok(document) => {
                info!(
                    path = %self.path.display(),
                    connections = document.connections.len(),
                    "workspace loaded"
                );
                Ok(document.connections)
            }
            Err(WorkspaceError::NotFound(_)) => {
                info!(path = %self.path.display(), "no workspace yet, starting empty");
                Ok(ConnectionRegistry::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ddpman_domain::WorkspaceDocument;
    use std::path::Path;

    enum Stored {
        Missing,
        Document(WorkspaceDocument),
        Broken,
    }

    struct MockRepository(Stored);

    impl WorkspaceRepository for MockRepository {
        async fn load(&self, path: &Path) -> Result<WorkspaceDocument, WorkspaceError> {
            match &self.0 {
                Stored::Missing => Err(WorkspaceError::NotFound(path.display().to_string())),
                Stored::Document(document) => Ok(document.clone()),
                Stored::Broken => Err(WorkspaceError::Serialization("expected value".into())),
            }
        }

        async fn save(&self, _path: &Path, _document: &WorkspaceDocument) -> Result<(), WorkspaceError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_document_yields_empty_registry() {
        let use_case = LoadWorkspace::new(MockRepository(Stored::Missing), "/tmp/workspace.json");
        assert!(use_case.execute().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loads_stored_connections() {
        let mut registry = ConnectionRegistry::new();
        registry.initialize();
        registry.add_connection();
        let stored = Stored::Document(WorkspaceDocument::new(registry.clone()));

        let use_case = LoadWorkspace::new(MockRepository(stored), "/tmp/workspace.json");
        assert_eq!(use_case.execute().await.unwrap(), registry);
    }

    #[tokio::test]
    async fn test_parse_errors_propagate() {
        let use_case = LoadWorkspace::new(MockRepository(Stored::Broken), "/tmp/workspace.json");
        assert!(matches!(
            use_case.execute().await,
            Err(WorkspaceError::Serialization(_))
        ));
    }
}
