//! Decorative effects: scroll reveal, heart pops, card shadows, timeline
//! zigzag and header parallax.
//!
//! Everything here is pure. The browser binding applies the returned style
//! values to elements; tests check them directly.

use std::collections::BTreeSet;

/// Style applied to a reveal target before it has been seen.
pub const REVEAL_HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateY(20px)",
};

/// Style applied once a reveal target crosses the visibility threshold.
pub const REVEAL_VISIBLE: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateY(0)",
};

pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Selector for elements that fade in on scroll.
pub const REVEAL_SELECTOR: &str = ".person-card, .timeline-content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

/// One-shot visibility flags for a fixed set of observed elements.
///
/// Each element starts hidden and flips to visible the first time it is
/// reported as intersecting. It never flips back.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: usize,
    revealed: BTreeSet<usize>,
}

impl RevealTracker {
    pub fn new(observed: usize) -> Self {
        Self {
            observed,
            revealed: BTreeSet::new(),
        }
    }

    /// Record an intersection report. Returns the style to apply on the first
    /// report for `index`, `None` for repeats and unknown indices.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> Option<RevealStyle> {
        if !intersecting || index >= self.observed {
            return None;
        }
        self.revealed.insert(index).then_some(REVEAL_VISIBLE)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

/// Pointer events on a decorative heart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartEvent {
    Over,
    Out,
    Click,
    /// The click animation timer elapsed.
    ClickSettled,
}

pub const HEART_TRANSITION: &str = "transform 0.2s ease";
pub const HEART_CLICK_SETTLE_MS: u32 = 200;

/// Transform to apply to a heart for `event`.
pub fn heart_transform(event: HeartEvent) -> &'static str {
    match event {
        HeartEvent::Over => "scale(1.3)",
        HeartEvent::Click => "scale(1.5)",
        HeartEvent::Out | HeartEvent::ClickSettled => "scale(1)",
    }
}

pub const CARD_SHADOW_HOVER: &str = "0 20px 40px rgba(0,0,0,0.15)";
pub const CARD_SHADOW_REST: &str = "0 8px 25px rgba(0,0,0,0.1)";

pub fn card_shadow(hovered: bool) -> &'static str {
    if hovered {
        CARD_SHADOW_HOVER
    } else {
        CARD_SHADOW_REST
    }
}

/// Left/right margins for the timeline entry at `index`, alternating so the
/// entries zigzag down the page.
pub fn timeline_margins(index: usize) -> (&'static str, &'static str) {
    if index % 2 == 0 {
        ("1rem", "3rem")
    } else {
        ("3rem", "1rem")
    }
}

/// Header transform for a page scrolled to `scroll_y`.
pub fn parallax_transform(scroll_y: f64, factor: f64) -> String {
    format!("translateY({}px)", scroll_y * factor)
}

/// Color button press feedback.
pub const BUTTON_PRESSED: &str = "scale(0.95)";
pub const BUTTON_RELEASED: &str = "scale(1)";
pub const BUTTON_RELEASE_MS: u32 = 150;
