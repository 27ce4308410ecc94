//! Server connection settings, credentials and connection status.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// WebSocket scheme used to reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain WebSocket.
    #[default]
    Ws,
    /// WebSocket over TLS.
    Wss,
}

impl Protocol {
    /// URL scheme.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Wss => "wss",
        }
    }
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// `ws` or `wss`.
    pub protocol: Protocol,
    /// Host name or address.
    pub host: String,
    /// Port, kept as text as entered.
    pub port: String,
    /// Path of the DDP socket, without leading slash.
    pub path: String,
    /// Delay between reconnection attempts, in milliseconds.
    pub reconnect_interval_ms: u64,
    /// Connection timeout, in milliseconds.
    pub max_timeout_ms: u64,
    /// Whether the client reconnects on its own.
    pub auto_reconnect: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            protocol: Protocol::Ws,
            host: "localhost".to_string(),
            port: "3001".to_string(),
            path: "websocket".to_string(),
            reconnect_interval_ms: 5000,
            max_timeout_ms: 7000,
            auto_reconnect: true,
        }
    }
}

impl ServerSettings {
    /// Builds `<protocol>://<host>[:<port>]/<path>`.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let port = self.port.trim();
        let path = self.path.trim_start_matches('/');
        if port.is_empty() {
            format!("{}://{}/{}", self.protocol.scheme(), self.host.trim(), path)
        } else {
            format!("{}://{}:{}/{}", self.protocol.scheme(), self.host.trim(), port, path)
        }
    }

    /// Validates the settings and builds the options handed to the client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` when the host is missing or the resulting URL
    /// is not a valid `ws://`/`wss://` URL.
    pub fn connect_options(&self) -> DomainResult<ConnectOptions> {
        if self.host.trim().is_empty() {
            return Err(DomainError::InvalidUrl("host is required".to_string()));
        }
        let endpoint = validate_endpoint(&self.endpoint_url())?;
        Ok(ConnectOptions {
            endpoint,
            reconnect_interval: Duration::from_millis(self.reconnect_interval_ms),
            max_timeout: Duration::from_millis(self.max_timeout_ms),
            auto_reconnect: self.auto_reconnect,
        })
    }
}

/// Options handed to the DDP client when connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Validated `ws://` or `wss://` URL.
    pub endpoint: Url,
    /// Delay between reconnection attempts.
    pub reconnect_interval: Duration,
    /// Connection timeout.
    pub max_timeout: Duration,
    /// Whether the client reconnects on its own.
    pub auto_reconnect: bool,
}

/// Parses a DDP endpoint URL, accepting only `ws` and `wss` with a host.
///
/// # Errors
///
/// Returns `InvalidUrl` describing why the URL was rejected.
pub fn validate_endpoint(raw: &str) -> DomainResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidUrl("endpoint is required".to_string()));
    }
    let url = Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(DomainError::InvalidUrl(format!(
            "{trimmed}: URL must start with ws:// or wss://"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::InvalidUrl(format!("{trimmed}: missing host")));
    }
    Ok(url)
}

/// Login credentials for `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Credentials {
    /// Stay anonymous.
    #[default]
    None,
    /// Log in by user name.
    Username {
        /// User name.
        username: String,
        /// Password.
        password: String,
    },
    /// Log in by e-mail address.
    Email {
        /// E-mail address.
        email: String,
        /// Password.
        password: String,
    },
}

impl Credentials {
    /// Returns true when a login should be attempted.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Lifecycle of the link to the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Not connected.
    #[default]
    Disconnected,
    /// Connection attempt in progress.
    Connecting,
    /// Connected anonymously.
    Connected,
    /// Connected and logged in.
    LoggedIn,
    /// The last attempt or the live link failed.
    Failed {
        /// Message reported by the client.
        message: String,
    },
}

impl ConnectionStatus {
    /// Returns true while calls can be sent.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected | Self::LoggedIn)
    }
}
