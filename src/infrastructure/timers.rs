use std::time::Duration;

use gloo_timers::callback::Timeout;

use crate::application::feed_client::{FeedDispatch, FeedEvent, ReconnectScheduler};

/// Reconnect timer on `setTimeout`. Dropping a [`Timeout`] clears it, so holding at most one
/// gives the single-pending-timer guarantee.
#[derive(Default)]
pub struct GlooTimeoutScheduler {
    pending: Option<Timeout>,
}

impl GlooTimeoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReconnectScheduler for GlooTimeoutScheduler {
    fn schedule(&mut self, delay: Duration, dispatch: FeedDispatch) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.pending = Some(Timeout::new(millis, move || dispatch(FeedEvent::ReconnectDue)));
    }

    fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}
