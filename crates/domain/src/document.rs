//! Persisted workspace document.

use serde::{Deserialize, Serialize};

use crate::registry::ConnectionRegistry;

/// Current schema version of the workspace document.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The full persisted state: every connection with its tree and tabs.
///
/// Fields are ordered alphabetically for deterministic serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    /// Registry snapshot.
    #[serde(default)]
    pub connections: ConnectionRegistry,

    /// Schema version for migration support.
    pub schema_version: u32,
}

impl WorkspaceDocument {
    /// Wraps a registry snapshot at the current schema version.
    #[must_use]
    pub const fn new(connections: ConnectionRegistry) -> Self {
        Self {
            connections,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}
