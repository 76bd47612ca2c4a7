//! Backend API client wrapper.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, instrument, warn};

use crate::config::{ApiEndpoints, REQUEST_TIMEOUT};
use crate::error::ApiError;
use crate::metrics;

use super::interceptor::{ErrorLogger, PassthroughRequest, RequestInterceptor, ResponseInterceptor};
use super::types::HealthResponse;

/// Anything that can probe backend health.
///
/// The status panel depends on this rather than on [`ApiClient`] so it can be
/// driven by fakes.
pub trait HealthProbe: Send + Sync {
    /// Run one health check.
    fn health_check(&self) -> impl Future<Output = Result<HealthResponse, ApiError>> + Send;
}

/// HTTP client bound to one backend.
///
/// Holds only immutable configuration and reqwest's connection pool, so
/// calls never share state and need no locking.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client with default headers and timeout applied.
    http: reqwest::Client,
    /// Resolved endpoints.
    endpoints: ApiEndpoints,
    /// Applied to outbound requests, in order.
    request_interceptors: Arc<Vec<Box<dyn RequestInterceptor>>>,
    /// Applied to inbound responses and errors, in order.
    response_interceptors: Arc<Vec<Box<dyn ResponseInterceptor>>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoints", &self.endpoints)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    endpoints: ApiEndpoints,
    timeout: Duration,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

impl ApiClientBuilder {
    /// Override the request timeout (defaults to [`REQUEST_TIMEOUT`]).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append a request interceptor.
    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    /// Append a response interceptor.
    pub fn with_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(ApiClient {
            http,
            endpoints: self.endpoints,
            request_interceptors: Arc::new(self.request_interceptors),
            response_interceptors: Arc::new(self.response_interceptors),
        })
    }
}

impl ApiClient {
    /// Start building a client with an empty interceptor chain.
    pub fn builder(endpoints: ApiEndpoints) -> ApiClientBuilder {
        ApiClientBuilder {
            endpoints,
            timeout: REQUEST_TIMEOUT,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Client with the standard chain: passthrough request hook, error logger.
    pub fn new(endpoints: ApiEndpoints) -> Result<Self, ApiError> {
        Self::builder(endpoints)
            .with_request_interceptor(PassthroughRequest)
            .with_response_interceptor(ErrorLogger)
            .build()
    }

    /// Endpoints this client talks to.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Check that the backend is reachable.
    #[instrument(skip(self), fields(url = %self.endpoints.health()))]
    pub async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        let started = Instant::now();
        let result = self
            .get(self.endpoints.health())
            .await
            .map(|body| HealthResponse::from_body(&body));

        metrics::record_health_check(result.as_ref().err().map(ApiError::kind), started.elapsed());
        if let Ok(response) = &result {
            debug!(message = ?response.message, "Health check succeeded");
        }

        result
    }

    /// GET `url` through the interceptor chain and return the raw body.
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        match self.send(Method::GET, url).await {
            Ok(body) => Ok(body),
            Err(err) => Err(self
                .response_interceptors
                .iter()
                .fold(err, |err, interceptor| interceptor.on_error(err))),
        }
    }

    async fn send(&self, method: Method, url: &str) -> Result<Vec<u8>, ApiError> {
        let mut request = self
            .http
            .request(method, url)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        for interceptor in self.request_interceptors.iter() {
            request = interceptor.intercept(request)?;
        }

        let mut response = self.http.execute(request).await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "Failed to read error response body");
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        for interceptor in self.response_interceptors.iter() {
            response = interceptor.on_response(response)?;
        }

        let body = response.bytes().await.map_err(ApiError::from)?;
        Ok(body.to_vec())
    }
}

impl HealthProbe for ApiClient {
    async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        ApiClient::health_check(self).await
    }
}
