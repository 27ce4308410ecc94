//! Connect server use case.

use std::sync::Arc;

use ddpman_domain::{ConnectionStatus, Credentials, ServerSettings};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::error::ApplicationResult;
use crate::ports::{DdpClient, DdpEvent};

/// Input for connecting to a server.
#[derive(Debug, Clone, Default)]
pub struct ConnectServerInput {
    /// Where to connect.
    pub settings: ServerSettings,
    /// Who to log in as, if anyone.
    pub credentials: Credentials,
}

/// Use case for connecting (and logging in) to a Meteor server.
///
/// Status transitions are published on a watch channel so the view can
/// show them while the attempt runs.
pub struct ConnectServer<C: DdpClient> {
    client: Arc<C>,
    status: watch::Sender<ConnectionStatus>,
}

impl<C: DdpClient> ConnectServer<C> {
    /// Creates a new `ConnectServer` use case.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);
        Self { client, status }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    fn set_status(&self, status: ConnectionStatus) {
        self.status.send_replace(status);
    }

    /// Validates the settings, connects, then logs in when credentials
    /// are given. Returns the resulting status.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` when the settings do not form a `ws://`/`wss://`
    ///   URL; no attempt is made and the status is unchanged
    /// - the client error when connecting or logging in fails
    pub async fn execute(&self, input: ConnectServerInput) -> ApplicationResult<ConnectionStatus> {
        let options = input.settings.connect_options()?;

        info!(endpoint = %options.endpoint, "connecting");
        self.set_status(ConnectionStatus::Connecting);
        if let Err(e) = self.client.connect(&options).await {
            warn!(endpoint = %options.endpoint, error = %e, "connection failed");
            self.set_status(ConnectionStatus::Failed {
                message: e.to_string(),
            });
            return Err(e.into());
        }
        self.set_status(ConnectionStatus::Connected);

        if input.credentials.requires_login() {
            let user_id = self.client.login(&input.credentials).await.inspect_err(|e| {
                warn!(error = %e, "login failed");
            })?;
            info!(%user_id, "logged in");
            self.set_status(ConnectionStatus::LoggedIn);
        }

        Ok(self.status())
    }

    /// Logs out, keeping the connection open.
    ///
    /// # Errors
    ///
    /// Returns the client error if the logout is rejected.
    pub async fn logout(&self) -> ApplicationResult<()> {
        self.client.logout().await?;
        info!("logged out");
        self.set_status(ConnectionStatus::Connected);
        Ok(())
    }

    /// Closes the connection.
    pub async fn disconnect(&self) {
        self.client.disconnect().await;
        info!("disconnected");
        self.set_status(ConnectionStatus::Disconnected);
    }

    /// Mirrors client lifecycle events into the status until the client
    /// drops its event sender.
    pub async fn track_events(&self) {
        let mut events = self.client.events();
        loop {
            match events.recv().await {
                Ok(event) => self.apply_event(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "missed client events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    fn apply_event(&self, event: DdpEvent) {
        let status = match event {
            DdpEvent::Connected | DdpEvent::Logout => ConnectionStatus::Connected,
            DdpEvent::Disconnected => ConnectionStatus::Disconnected,
            DdpEvent::Error(message) => ConnectionStatus::Failed { message },
            DdpEvent::Login { .. } => ConnectionStatus::LoggedIn,
        };
        self.set_status(status);
    }
}
