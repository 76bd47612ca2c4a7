//! Unified error types for the backend client.

use strum::Display;
use thiserror::Error;

/// Unified error type for the backend client.
#[derive(Error, Debug)]
pub enum AppError {
    /// Environment configuration could not be loaded.
    #[error("configuration error: {0}")]
    Env(#[from] envy::Error),

    /// Endpoint configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API call failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),
}

/// Endpoint configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Failure of a single API call.
///
/// Every failure is exactly one of three shapes, mirroring where the request
/// died: at the server, on the wire, or before it left the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server responded with a non-2xx status.
    #[error("server responded with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body (may be empty).
        body: String,
    },

    /// Request was sent but no response arrived (connect failure, timeout).
    #[error("no response from server: {0}")]
    Network(#[source] reqwest::Error),

    /// Request could not be constructed or was rejected before sending.
    #[error("request could not be sent: {0}")]
    Request(String),
}

/// Discriminant of [`ApiError`], used for logging and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ApiErrorKind {
    /// Server replied with an error status.
    Status,
    /// No response received.
    Network,
    /// Request never left the client.
    Request,
}

impl ApiError {
    /// Which of the three failure shapes this is.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Status { .. } => ApiErrorKind::Status,
            ApiError::Network(_) => ApiErrorKind::Network,
            ApiError::Request(_) => ApiErrorKind::Request,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    /// Sort a transport error into one of the three shapes.
    ///
    /// Builder errors never reached the wire; everything else (connect,
    /// timeout, body, redirect) was sent and got no usable response.
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let status = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(status.kind(), ApiErrorKind::Status);
        assert_eq!(status.status(), Some(500));

        let request = ApiError::Request("bad header".to_string());
        assert_eq!(request.kind(), ApiErrorKind::Request);
        assert_eq!(request.status(), None);
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(ApiErrorKind::Status.to_string(), "status");
        assert_eq!(ApiErrorKind::Network.to_string(), "network");
        assert_eq!(ApiErrorKind::Request.to_string(), "request");
    }

    #[test]
    fn status_error_message_includes_code_and_body() {
        let err = ApiError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "server responded with HTTP 503: maintenance");
    }

    #[test]
    fn builder_errors_never_left_the_client() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(err.is_builder());
        assert_eq!(ApiError::from(err).kind(), ApiErrorKind::Request);
    }

    #[test]
    fn config_error_wraps_into_app_error() {
        let err: AppError = ConfigError::InvalidBaseUrl {
            url: "x".to_string(),
            reason: "relative URL without a base".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("configuration error: invalid base url 'x'"));
    }
}
