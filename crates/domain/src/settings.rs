//! Client settings.
//!
//! Persisted as `settings.json` in the platform config directory.

use serde::{Deserialize, Serialize};

use crate::server::ServerSettings;

/// User-level client preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Settings prefilled in the server connection form.
    pub server: ServerSettings,

    /// When set, collections can only be added to or removed from a
    /// connection while at least one other connection exists.
    pub collections_require_peer_connection: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            collections_require_peer_connection: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert!(settings.collections_require_peer_connection);
        assert_eq!(settings.server.port, "3001");
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"collections_require_peer_connection": false}"#).unwrap();
        assert!(!settings.collections_require_peer_connection);
        assert_eq!(settings.server, ServerSettings::default());
    }
}
