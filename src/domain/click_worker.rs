//! Background worker persisting deferred click increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Drains the click channel and applies one durable increment per event.
///
/// Failures are logged and swallowed: the redirect that produced the event
/// has already been answered, so the only consequence is a click count that
/// lags until a later write succeeds. The worker exits when every sender has
/// been dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn UrlRepository>,
) {
    while let Some(event) = rx.recv().await {
        match repository.increment_clicks(&event.code).await {
            Ok(Some(clicks)) => {
                debug!(code = %event.code, clicks, "persisted click");
            }
            Ok(None) => {
                // Record deleted between redirect and drain; nothing to count.
                debug!(code = %event.code, "click for missing record dropped");
            }
            Err(e) => {
                warn!(code = %event.code, error = %e, "failed to persist click");
            }
        }
    }

    debug!("click worker stopped");
}
