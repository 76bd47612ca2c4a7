//! Mock health probe for unit testing.
//!
//! This module provides a probe that can be used in tests
//! without making real network requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ApiError;

use super::client::HealthProbe;
use super::types::HealthResponse;

/// What the mock probe answers with.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Backend is healthy and returns this body.
    Healthy(HealthResponse),
    /// Backend answers with an error status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// Request is rejected before it is sent.
    Rejected(String),
}

impl Default for MockOutcome {
    fn default() -> Self {
        MockOutcome::Healthy(HealthResponse::default())
    }
}

/// Mock health probe for testing.
#[derive(Debug, Clone, Default)]
pub struct MockHealthProbe {
    /// Answer for every call.
    outcome: MockOutcome,
    /// Simulated latency.
    latency: Duration,
    /// Number of calls made so far.
    calls: Arc<AtomicUsize>,
}

impl MockHealthProbe {
    /// Probe that always answers with `outcome`.
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            ..Self::default()
        }
    }

    /// Healthy probe returning `message`.
    pub fn healthy(message: impl Into<String>) -> Self {
        Self::new(MockOutcome::Healthy(HealthResponse::with_message(message)))
    }

    /// Probe whose backend answers with `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockOutcome::Status {
            status,
            body: body.into(),
        })
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of health checks run so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HealthProbe for MockHealthProbe {
    async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match &self.outcome {
            MockOutcome::Healthy(response) => Ok(response.clone()),
            MockOutcome::Status { status, body } => Err(ApiError::Status {
                status: *status,
                body: body.clone(),
            }),
            MockOutcome::Rejected(message) => Err(ApiError::Request(message.clone())),
        }
    }
}
