use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Numbers async requests so only the answer to the latest one is applied.
#[derive(Clone, Default, PartialEq)]
pub struct LatestRequest(Rc<Cell<u64>>);

impl LatestRequest {
    /// Starts a new request; every earlier ticket goes stale.
    pub fn issue(&self) -> u64 {
        let ticket = self.0.get() + 1;
        self.0.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

pub fn use_latest_request() -> LatestRequest {
    use_hook(LatestRequest::default)
}

/// Calls `action` with the last input once `delay_ms` passed without another one.
pub fn use_debounce<T: 'static>(delay_ms: u32, action: Callback<T>) -> Callback<T> {
    let latest = use_latest_request();
    use_callback(move |input: T| {
        let ticket = latest.issue();
        let latest = latest.clone();
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if latest.is_current(ticket) {
                action.call(input);
            }
        });
    })
}
