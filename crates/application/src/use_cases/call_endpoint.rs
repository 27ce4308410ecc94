//! Call endpoint use case.
//!
//! Sends the open endpoint to the server and turns whatever comes back
//! into a [`CallState`] for the response panel. Remote errors are results
//! too: they end up in `CallState::Failed` with the server message.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ddpman_domain::{CallState, EndpointType, OpenEndpoint};
use tracing::{debug, info};

use crate::ports::{Clock, DdpClient};

/// Message returned when a second call is sent before the first returned.
pub const CALL_IN_PROGRESS: &str = "call already in progress";

/// Clears the in-flight flag when the call finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for invoking a method or publication.
///
/// One call at a time per value; there is no queue and no cancellation.
pub struct CallEndpoint<C: DdpClient, K: Clock> {
    client: Arc<C>,
    clock: Arc<K>,
    in_flight: AtomicBool,
}

impl<C: DdpClient, K: Clock> CallEndpoint<C, K> {
    /// Creates a new `CallEndpoint` use case.
    #[must_use]
    pub const fn new(client: Arc<C>, clock: Arc<K>) -> Self {
        Self {
            client,
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns true while a call is outstanding.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends the endpoint with its materialized arguments.
    ///
    /// Methods go through `call`, publications through `subscribe`. Blank
    /// argument slots are left out.
    pub async fn execute(&self, endpoint: &OpenEndpoint) -> CallState {
        let Some(name) = endpoint
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        else {
            return CallState::rejected("Endpoint name is required");
        };

        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!(endpoint = name, "call rejected while another is in flight");
            return CallState::rejected(CALL_IN_PROGRESS);
        }
        let _guard = InFlight(&self.in_flight);

        let args = endpoint.args.materialize();
        let endpoint_type = endpoint.endpoint_type.unwrap_or_default();
        info!(endpoint = name, %endpoint_type, args = args.len(), "sending call");

        let started = self.clock.now();
        let result = match endpoint_type {
            EndpointType::Method => self.client.call(name, args).await,
            EndpointType::Publication => self.client.subscribe(name, args).await,
        };
        let elapsed_ms = u64::try_from((self.clock.now() - started).num_milliseconds()).unwrap_or(0);

        match result {
            Ok(result) => {
                debug!(endpoint = name, elapsed_ms, "call completed");
                CallState::Completed { result, elapsed_ms }
            }
            Err(e) => {
                info!(endpoint = name, error = %e, "call failed");
                CallState::Failed {
                    message: e.to_string(),
                    elapsed_ms: Some(elapsed_ms),
                }
            }
        }
    }
}
