//! Displayed API status.

use std::fmt;

use crate::api::HealthResponse;
use crate::error::ApiError;

/// Shown while the health check is in flight.
pub const CHECKING_TEXT: &str = "Checking...";

/// Shown when the server answered without a message.
pub const DEFAULT_CONNECTED_MESSAGE: &str = "Connected";

/// Shown for every kind of failure.
pub const CONNECTION_FAILED_TEXT: &str =
    "API: Connection failed - Make sure Django server is running";

/// Connection status as shown to the user.
///
/// `Checking` is the only non-terminal state; a status moves out of it once
/// and never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiStatus {
    /// Health check in flight.
    #[default]
    Checking,
    /// Backend answered; carries the message to show.
    Connected(String),
    /// Health check failed, whatever the cause.
    Failed,
}

impl ApiStatus {
    /// Collapse a health check outcome into a terminal status.
    ///
    /// Every error kind maps to the same `Failed` status.
    pub fn from_outcome(outcome: &Result<HealthResponse, ApiError>) -> Self {
        match outcome {
            Ok(response) => ApiStatus::Connected(
                response
                    .message()
                    .unwrap_or(DEFAULT_CONNECTED_MESSAGE)
                    .to_string(),
            ),
            Err(_) => ApiStatus::Failed,
        }
    }

    /// Whether the status will never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApiStatus::Checking)
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStatus::Checking => f.write_str(CHECKING_TEXT),
            ApiStatus::Connected(message) => write!(f, "API: {}", message),
            ApiStatus::Failed => f.write_str(CONNECTION_FAILED_TEXT),
        }
    }
}
