//! API status shown to the user.
//!
//! This module handles:
//! - The three-state status and its display text
//! - The panel that runs one health check per mount

pub mod panel;
pub mod state;

pub use panel::StatusPanel;
pub use state::{ApiStatus, CHECKING_TEXT, CONNECTION_FAILED_TEXT, DEFAULT_CONNECTED_MESSAGE};
