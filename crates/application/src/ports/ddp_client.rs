//! DDP client port.
//!
//! The wire protocol lives behind this trait; the application only sees
//! connect, login, call and subscribe plus a stream of lifecycle events.

use std::future::Future;

use ddpman_domain::{ConnectOptions, Credentials};
use serde_json::Value;
use tokio::sync::broadcast;

/// Error type for DDP client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DdpClientError {
    /// The socket could not be opened or was lost.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The operation needs a live connection.
    #[error("Not connected")]
    NotConnected,

    /// The server rejected the credentials.
    #[error("Login failed: {0}")]
    Login(String),

    /// The server answered with an error. Shown to the user as is.
    #[error("{message}")]
    Remote {
        /// Server error message, e.g. `Method 'x' not found [404]`.
        message: String,
    },

    /// No answer before the configured timeout.
    #[error("Timed out")]
    Timeout,
}

/// Lifecycle events emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdpEvent {
    /// The socket is connected.
    Connected,
    /// The socket was closed.
    Disconnected,
    /// The client reported an error.
    Error(String),
    /// A user logged in.
    Login {
        /// Id of the logged-in user.
        user_id: String,
    },
    /// The user logged out.
    Logout,
}

/// Port for talking to a Meteor server over DDP.
pub trait DdpClient: Send + Sync {
    /// Opens the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    fn connect(
        &self,
        options: &ConnectOptions,
    ) -> impl Future<Output = Result<(), DdpClientError>> + Send;

    /// Closes the connection.
    fn disconnect(&self) -> impl Future<Output = ()> + Send;

    /// Logs in and returns the user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<String, DdpClientError>> + Send;

    /// Logs out the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the logout.
    fn logout(&self) -> impl Future<Output = Result<(), DdpClientError>> + Send;

    /// Calls a method with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns the server error, or a transport error.
    fn call(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, DdpClientError>> + Send;

    /// Subscribes to a publication and returns what the server sent once ready.
    ///
    /// # Errors
    ///
    /// Returns the server error, or a transport error.
    fn subscribe(
        &self,
        publication: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, DdpClientError>> + Send;

    /// Subscribes to lifecycle events.
    fn events(&self) -> broadcast::Receiver<DdpEvent>;
}
