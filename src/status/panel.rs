//! Status panel: runs one health check per mount and publishes the result.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::HealthProbe;

use super::state::ApiStatus;

/// A mounted status panel.
///
/// Mounting launches exactly one health check. Dropping the panel does not
/// cancel it; a completion that arrives after unmount is discarded.
#[derive(Debug)]
pub struct StatusPanel {
    status: watch::Receiver<ApiStatus>,
    task: JoinHandle<()>,
}

impl StatusPanel {
    /// Mount the panel and launch its health check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<P>(probe: Arc<P>) -> Self
    where
        P: HealthProbe + 'static,
    {
        let (tx, rx) = watch::channel(ApiStatus::Checking);

        let task = tokio::spawn(async move {
            let outcome = probe.health_check().await;
            let status = ApiStatus::from_outcome(&outcome);
            debug!(status = %status, "API status settled");

            // Fails only if the panel was unmounted meanwhile.
            if tx.send(status).is_err() {
                debug!("Status panel unmounted before health check finished");
            }
        });

        info!("Status panel mounted, checking API");

        Self { status: rx, task }
    }

    /// Current status.
    pub fn status(&self) -> ApiStatus {
        self.status.borrow().clone()
    }

    /// Wait until the health check has finished and return the terminal status.
    ///
    /// Returns `Failed` if the check task died without publishing.
    pub async fn settled(&mut self) -> ApiStatus {
        match self.status.wait_for(ApiStatus::is_terminal).await {
            Ok(status) => status.clone(),
            Err(_) => ApiStatus::Failed,
        }
    }

    /// Whether the background check is still running.
    pub fn is_checking(&self) -> bool {
        !self.task.is_finished()
    }
}
