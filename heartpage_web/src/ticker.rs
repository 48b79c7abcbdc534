//! `setInterval`-backed [`Ticker`].

use std::cell::RefCell;
use std::rc::Weak;

use gloo_timers::callback::Interval;
use heartpage::Ticker;

use crate::WebPage;

/// Holds at most one browser interval. Dropping the [`Interval`] clears it,
/// so `stop` and drop both cancel.
pub struct IntervalTicker {
    page: Weak<RefCell<WebPage>>,
    interval: Option<Interval>,
}

impl IntervalTicker {
    /// The interval callback only holds `page` weakly; a dropped page stops
    /// receiving ticks instead of being kept alive by its own timer.
    pub fn new(page: Weak<RefCell<WebPage>>) -> Self {
        Self {
            page,
            interval: None,
        }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, period_ms: u32) {
        let page = self.page.clone();
        // The previous interval, if any, is cleared when it is replaced.
        self.interval = Some(Interval::new(period_ms, move || {
            if let Some(page) = page.upgrade() {
                if let Ok(mut page) = page.try_borrow_mut() {
                    page.tick();
                }
            }
        }));
    }

    fn stop(&mut self) {
        self.interval = None;
    }
}
