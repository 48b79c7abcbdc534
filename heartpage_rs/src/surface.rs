//! Rendering seams between the controllers and whatever draws the page.
//!
//! The browser binding implements these over real DOM nodes; the
//! [`headless`](crate::headless) module implements them in memory.

/// Everything the carousel needs to draw itself.
pub trait CarouselSurface {
    /// Replace the indicator container contents with `count` indicators,
    /// in slide order. Each indicator is expected to route a click back as
    /// "jump to its index".
    fn build_indicators(&mut self, count: usize);

    /// Apply the track translation. `css` is a full transform value such as
    /// `translateX(-200%)`.
    fn set_track_transform(&mut self, css: &str);

    /// Set or clear the active flag of one indicator.
    fn set_indicator_active(&mut self, index: usize, active: bool);
}

/// Page-level elements beyond the carousel.
pub trait PageSurface: CarouselSurface {
    /// Apply a CSS background value to the page body.
    fn set_background(&mut self, css: &str);

    /// Set the color button transform (`scale(0.95)` on press, `scale(1)` on release).
    fn set_color_button_transform(&mut self, css: &str);

    /// Set the header transform used for the parallax effect.
    fn set_header_transform(&mut self, css: &str);
}

/// Source of timer callbacks for autoplay.
///
/// Implementations own at most one repeating timer. `start` replaces any
/// running timer; `stop` on an idle ticker is a no-op.
pub trait Ticker {
    fn start(&mut self, period_ms: u32);
    fn stop(&mut self);
}
