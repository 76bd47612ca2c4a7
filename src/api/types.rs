//! Response payloads of the backend API.

use serde_json::{Map, Value};
use tracing::warn;

/// Body of the health endpoint.
///
/// No schema is enforced: only a string `message` is read, anything else the
/// server sends is kept in `extra` and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthResponse {
    /// Human readable status from the server.
    pub message: Option<String>,
    /// Every other field of the payload.
    pub extra: Map<String, Value>,
}

impl HealthResponse {
    /// Response carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            extra: Map::new(),
        }
    }

    /// Parse a raw body leniently.
    ///
    /// A non-object body or a non-string `message` yields an empty response
    /// rather than an error.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Health response is not JSON, ignoring body");
                return Self::default();
            }
        };

        match value {
            Value::Object(mut fields) => {
                let message = match fields.remove("message") {
                    Some(Value::String(message)) => Some(message),
                    Some(other) => {
                        warn!(message = %other, "Health response message is not a string");
                        None
                    }
                    None => None,
                };
                Self {
                    message,
                    extra: fields,
                }
            }
            other => {
                warn!(body = %other, "Health response is not a JSON object, ignoring body");
                Self::default()
            }
        }
    }

    /// The message, treating an empty string as absent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
