//! Persistence implementations for file-based storage.

mod file_system;
mod settings_repository;
mod workspace_repository;

pub use file_system::TokioFileSystem;
pub use settings_repository::{SettingsError, SettingsRepository};
pub use workspace_repository::{FileWorkspaceRepository, default_workspace_path};
