//! Auto-advance timer lifecycle.
//!
//! [`Autoplay`] owns the single repeating timer (through a [`Ticker`]) and
//! tracks whether it is running. It never touches the carousel itself; the
//! ticker's callbacks do that.

use serde::Serialize;
use tracing::{debug, info};

use crate::surface::Ticker;

/// Default auto-advance period.
pub const NORMAL_PERIOD_MS: u32 = 5_000;
/// Slower auto-advance period used on narrow screens.
pub const NARROW_PERIOD_MS: u32 = 7_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayState {
    /// Never started, or cancelled on teardown.
    Stopped,
    Running,
    Paused,
}

#[derive(Debug)]
pub struct Autoplay<T: Ticker> {
    ticker: T,
    period_ms: u32,
    state: AutoplayState,
}

impl<T: Ticker> Autoplay<T> {
    pub fn new(ticker: T, period_ms: u32) -> Self {
        Self {
            ticker,
            period_ms,
            state: AutoplayState::Stopped,
        }
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AutoplayState::Running
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Start (or restart) the timer with `period_ms`.
    pub fn start(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
        self.ticker.start(period_ms);
        self.state = AutoplayState::Running;
        debug!(period_ms, "autoplay started");
    }

    pub fn pause(&mut self) {
        if self.state != AutoplayState::Running {
            return;
        }
        self.ticker.stop();
        self.state = AutoplayState::Paused;
        info!("autoplay paused");
    }

    /// Resume with the stored period. Only a paused timer resumes; a
    /// cancelled one stays cancelled.
    pub fn resume(&mut self) {
        if self.state != AutoplayState::Paused {
            return;
        }
        self.ticker.start(self.period_ms);
        self.state = AutoplayState::Running;
        info!(period_ms = self.period_ms, "autoplay resumed");
    }

    pub fn toggle(&mut self) {
        match self.state {
            AutoplayState::Running => self.pause(),
            AutoplayState::Paused => self.resume(),
            AutoplayState::Stopped => debug!("autoplay toggle ignored: timer is stopped"),
        }
    }

    /// Switch to a new period in one step. A running timer is stopped and
    /// restarted before returning; a paused or stopped one only records the
    /// period for later.
    pub fn reconfigure(&mut self, period_ms: u32) {
        if period_ms == self.period_ms {
            return;
        }
        self.period_ms = period_ms;
        if self.state == AutoplayState::Running {
            self.ticker.stop();
            self.ticker.start(period_ms);
            debug!(period_ms, "autoplay restarted with new period");
        }
    }

    /// Cancel the timer for good. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if self.state == AutoplayState::Running {
            self.ticker.stop();
        }
        self.state = AutoplayState::Stopped;
    }
}
