//! File based workspace repository implementation.
//!
//! The whole registry lives in one JSON document. Saves go to a sibling
//! temporary file first and are then renamed over the document, so a
//! crash mid-write leaves the previous document intact.

use std::path::{Path, PathBuf};

use ddpman_application::ports::{FileSystem, FileSystemError, WorkspaceError, WorkspaceRepository};
use ddpman_domain::{CURRENT_SCHEMA_VERSION, WorkspaceDocument};
use tracing::debug;

use crate::serialization::{from_json, to_json_stable};

const APP_DIR: &str = "ddpman";
const WORKSPACE_FILE: &str = "workspace.json";

/// Default document location: `<data dir>/ddpman/workspace.json`.
///
/// Returns `None` when the platform has no data directory.
#[must_use]
pub fn default_workspace_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_DIR).join(WORKSPACE_FILE))
}

fn fs_error(e: &FileSystemError) -> WorkspaceError {
    WorkspaceError::FileSystem(e.to_string())
}

/// File system based implementation of `WorkspaceRepository`.
pub struct FileWorkspaceRepository<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> FileWorkspaceRepository<F> {
    /// Creates a new repository with the given file system implementation.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem + Send + Sync> WorkspaceRepository for FileWorkspaceRepository<F> {
    async fn load(&self, path: &Path) -> Result<WorkspaceDocument, WorkspaceError> {
        if !self.fs.exists(path).await {
            return Err(WorkspaceError::NotFound(path.display().to_string()));
        }

        let content = self
            .fs
            .read_file_string(path)
            .await
            .map_err(|e| fs_error(&e))?;

        let document: WorkspaceDocument =
            from_json(&content).map_err(|e| WorkspaceError::Serialization(e.to_string()))?;

        if document.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(WorkspaceError::SchemaMismatch {
                expected: CURRENT_SCHEMA_VERSION,
                found: document.schema_version,
            });
        }

        debug!(path = %path.display(), "workspace document parsed");
        Ok(document)
    }

    async fn save(&self, path: &Path, document: &WorkspaceDocument) -> Result<(), WorkspaceError> {
        let json =
            to_json_stable(document).map_err(|e| WorkspaceError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .await
                .map_err(|e| fs_error(&e))?;
        }

        let staging = path.with_extension("json.tmp");
        self.fs
            .write_file(&staging, json.as_bytes())
            .await
            .map_err(|e| fs_error(&e))?;
        self.fs
            .rename(&staging, path)
            .await
            .map_err(|e| fs_error(&e))
    }
}
