//! Recurring tick on the browser event loop via `setInterval`.

use gloo_timers::callback::Interval;
use term_core::ports::{TickHandle, Ticker};

#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    fn every(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> Box<dyn TickHandle> {
        Box::new(IntervalHandle {
            interval: Interval::new(interval_ms, callback),
        })
    }
}

/// Dropping the inner `Interval` clears it as well.
pub struct IntervalHandle {
    interval: Interval,
}

impl TickHandle for IntervalHandle {
    fn cancel(self: Box<Self>) {
        self.interval.cancel();
    }
}
