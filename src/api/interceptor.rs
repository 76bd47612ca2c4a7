//! Request and response interceptors.
//!
//! Interceptors run in registration order on every call. A request
//! interceptor either hands the request on or rejects it. A response
//! interceptor either hands the response on or turns it into an error, and
//! sees every error on the way back out: `on_error` must return an error, so
//! a failure can be annotated or logged but never swallowed.

use reqwest::{Request, Response};
use tracing::error;

use crate::error::ApiError;

/// Hook applied to every outbound request.
pub trait RequestInterceptor: Send + Sync {
    /// Inspect or rewrite the request before it is sent.
    fn intercept(&self, request: Request) -> Result<Request, ApiError>;
}

/// Hook applied to every inbound response and every failure.
pub trait ResponseInterceptor: Send + Sync {
    /// Inspect a successful (2xx) response.
    fn on_response(&self, response: Response) -> Result<Response, ApiError> {
        Ok(response)
    }

    /// Observe a failure. The returned error is re-signalled to the caller.
    fn on_error(&self, error: ApiError) -> ApiError {
        error
    }
}

/// Request hook that passes requests through untouched.
///
/// Reserved for attaching an `Authorization: Bearer` header once the app has
/// a token store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRequest;

impl RequestInterceptor for PassthroughRequest {
    fn intercept(&self, request: Request) -> Result<Request, ApiError> {
        Ok(request)
    }
}

/// Response hook that logs each failure once and re-raises it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogger;

impl ResponseInterceptor for ErrorLogger {
    fn on_error(&self, err: ApiError) -> ApiError {
        match &err {
            ApiError::Status { status, body } => {
                error!(status = *status, body = %body, "API error");
            }
            ApiError::Network(cause) => {
                error!(
                    url = cause.url().map(|u| u.as_str()).unwrap_or("<unknown>"),
                    timeout = cause.is_timeout(),
                    error = %cause,
                    "Network error"
                );
            }
            ApiError::Request(message) => {
                error!(error = %message, "Error");
            }
        }
        err
    }
}
