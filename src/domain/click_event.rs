//! Click event passed from the redirect path to the background worker.

/// A pending click-count increment for one short code.
///
/// Created on the redirect hot path and pushed onto a bounded channel; the
/// durable write happens later in
/// [`crate::domain::click_worker::run_click_worker`]. Delivery is
/// at-most-once: when the channel is full the event is dropped and the
/// durable count undercounts until a later redirect lands.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
