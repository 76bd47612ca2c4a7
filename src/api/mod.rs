//! Backend API module.
//!
//! This module handles:
//! - The HTTP client bound to the configured backend
//! - Request/response interceptor chains
//! - Response payload types
//! - Mock probe for testing

pub mod client;
pub mod interceptor;
pub mod mock;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, HealthProbe};
pub use interceptor::{ErrorLogger, PassthroughRequest, RequestInterceptor, ResponseInterceptor};
pub use mock::{MockHealthProbe, MockOutcome};
pub use types::HealthResponse;
