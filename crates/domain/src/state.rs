//! Call execution state for the response panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State of the last call sent from an open endpoint.
///
/// - `Idle`: nothing sent yet
/// - `Sending`: call in flight, the send control is disabled
/// - `Completed`: the server returned a result
/// - `Failed`: validation, transport or server error, shown verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CallState {
    /// No call has been sent yet.
    #[default]
    Idle,

    /// A call is in flight.
    Sending {
        /// When the call started.
        started_at: DateTime<Utc>,
    },

    /// The call returned a result.
    Completed {
        /// Result returned by the server.
        result: Value,
        /// Round-trip time in milliseconds.
        elapsed_ms: u64,
    },

    /// The call failed.
    Failed {
        /// Error message, as reported.
        message: String,
        /// Round-trip time in milliseconds, if the call was sent.
        elapsed_ms: Option<u64>,
    },
}

impl CallState {
    /// Creates a `Sending` state.
    #[must_use]
    pub const fn sending(started_at: DateTime<Utc>) -> Self {
        Self::Sending { started_at }
    }

    /// Creates a `Failed` state for a call that was never sent.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            elapsed_ms: None,
        }
    }

    /// Returns true while a call is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Returns true if the last call failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Text shown in the response panel.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Sending { .. } => "Sending...".to_string(),
            Self::Completed { result, .. } => {
                serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string())
            }
            Self::Failed { message, .. } => message.clone(),
        }
    }
}
