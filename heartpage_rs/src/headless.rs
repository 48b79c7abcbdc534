//! In-memory surface and virtual clock.
//!
//! Used by the `replay` command and by tests: the surface records what would
//! have been written to the DOM, the ticker fires only when virtual time is
//! advanced.

use crate::page::Page;
use crate::surface::{CarouselSurface, PageSurface, Ticker};

/// Records every write the controllers make.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    /// Active flag per indicator, in slide order.
    pub indicators: Vec<bool>,
    pub track_transform: String,
    /// Number of track transform writes, i.e. renders.
    pub track_writes: usize,
    pub background: Option<String>,
    pub color_button_transform: String,
    pub header_transform: String,
}

impl HeadlessSurface {
    pub fn active_indicators(&self) -> Vec<usize> {
        self.indicators
            .iter()
            .enumerate()
            .filter_map(|(i, active)| active.then_some(i))
            .collect()
    }
}

impl CarouselSurface for HeadlessSurface {
    fn build_indicators(&mut self, count: usize) {
        self.indicators = vec![false; count];
    }

    fn set_track_transform(&mut self, css: &str) {
        self.track_transform = css.to_string();
        self.track_writes += 1;
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.indicators.get_mut(index) {
            *slot = active;
        }
    }
}

impl PageSurface for HeadlessSurface {
    fn set_background(&mut self, css: &str) {
        self.background = Some(css.to_string());
    }

    fn set_color_button_transform(&mut self, css: &str) {
        self.color_button_transform = css.to_string();
    }

    fn set_header_transform(&mut self, css: &str) {
        self.header_transform = css.to_string();
    }
}

/// Repeating timer over virtual time. Behaves like `setInterval`: starting
/// resets the phase, and a fire happens every full period of elapsed time.
#[derive(Debug, Clone, Default)]
pub struct VirtualTicker {
    period_ms: Option<u32>,
    phase_ms: u64,
    starts: Vec<u32>,
    stops: usize,
}

impl VirtualTicker {
    pub fn active_period(&self) -> Option<u32> {
        self.period_ms
    }

    /// Every period the ticker has been started with, in order.
    pub fn starts(&self) -> &[u32] {
        &self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Let `ms` of virtual time pass and return how many times the timer fired.
    pub fn advance(&mut self, ms: u64) -> u64 {
        let Some(period) = self.period_ms else {
            return 0;
        };
        let period = u64::from(period);
        let elapsed = self.phase_ms.saturating_add(ms);
        self.phase_ms = elapsed % period;
        elapsed / period
    }
}

impl Ticker for VirtualTicker {
    fn start(&mut self, period_ms: u32) {
        self.period_ms = Some(period_ms);
        self.phase_ms = 0;
        self.starts.push(period_ms);
    }

    fn stop(&mut self) {
        self.period_ms = None;
        self.phase_ms = 0;
        self.stops += 1;
    }
}

/// A page wired to the in-memory surface and virtual clock.
pub type HeadlessPage = Page<HeadlessSurface, VirtualTicker>;

impl HeadlessPage {
    /// Advance virtual time by `ms` and return how many times the timer fired.
    ///
    /// Ticks only rotate the carousel, so beyond one full lap the fires are
    /// folded modulo the slide count.
    pub fn elapse(&mut self, ms: u64) -> u64 {
        let fires = self.autoplay.ticker_mut().advance(ms);
        let total = self.total_slides() as u64;
        let steps = if fires > total {
            total + fires % total
        } else {
            fires
        };
        for _ in 0..steps {
            self.tick();
        }
        fires
    }
}
