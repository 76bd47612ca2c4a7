//! FlashBricks backend client.
//!
//! Checks that the FlashBricks backend is reachable and turns the answer into
//! a one-line status for display.
//!
//! # Flow
//!
//! ```text
//! build mode ──> ApiEndpoints ──> ApiClient ──> StatusPanel
//!  (dev/prod)    (base, health)   (GET /api/health/)   Checking...
//!                                                      -> API: <message>
//!                                                      -> API: Connection failed ...
//! ```
//!
//! # Modules
//!
//! - [`config`]: Build mode, endpoints and environment configuration
//! - [`error`]: Unified error types
//! - [`api`]: HTTP client, interceptors and response types
//! - [`status`]: Displayed status and the panel that drives it
//! - [`metrics`]: Health check metrics

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod status;

pub use config::{ApiEndpoints, BuildMode, Config};
pub use error::{ApiError, AppError, Result};
