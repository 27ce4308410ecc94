//! Client settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux: ~/.config/ddpman/settings.json
//! - macOS: ~/Library/Application Support/ddpman/settings.json
//! - Windows: %APPDATA%/ddpman/settings.json

use std::path::{Path, PathBuf};

use ddpman_domain::ClientSettings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for client settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRepository {
    /// Repository for the platform settings file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("ddpman").join("settings.json")),
        }
    }

    /// Repository for a settings file at an explicit location.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Where settings are stored, if the platform has a config directory.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings, falling back to defaults when there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(ClientSettings::default());
        };

        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(ClientSettings::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(from_json_bytes(&content)?)
    }

    /// Saves settings, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or the file cannot
    /// be written.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, to_json_stable_bytes(settings)?).await?;
        Ok(())
    }
}
