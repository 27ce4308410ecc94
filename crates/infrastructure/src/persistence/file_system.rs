//! Real file system implementation.

use std::io::ErrorKind;
use std::path::Path;

use ddpman_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, e: std::io::Error) -> FileSystemError {
    match e.kind() {
        ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        ErrorKind::InvalidData => FileSystemError::InvalidUtf8(path.to_path_buf()),
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        fs::rename(from, to).await.map_err(|e| map_io_error(from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("workspace.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"{}\n").await.expect("write");

        assert!(fs.exists(&path).await);
        assert_eq!(fs.read_file_string(&path).await.expect("read"), "{}\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");

        let result = TokioFileSystem::new().read_file_string(&path).await;

        assert!(matches!(result, Err(FileSystemError::NotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("binary.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write");

        let result = TokioFileSystem::new().read_file_string(&path).await;

        assert!(matches!(result, Err(FileSystemError::InvalidUtf8(_))));
    }

    #[tokio::test]
    async fn test_rename() {
        let dir = tempdir().expect("temp dir");
        let from = dir.path().join("a.tmp");
        let to = dir.path().join("a.json");
        let fs = TokioFileSystem::new();
        fs.write_file(&from, b"1").await.expect("write");

        fs.rename(&from, &to).await.expect("rename");

        assert!(!fs.exists(&from).await);
        assert!(fs.exists(&to).await);
    }
}
