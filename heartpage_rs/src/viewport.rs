//! Viewport profile: the single width threshold that tunes the page for
//! small screens.

use serde::Serialize;

/// Widths at or below this are treated as narrow.
pub const NARROW_MAX_WIDTH: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Normal,
    Narrow,
}

impl Profile {
    pub fn from_width(width: u32, narrow_max_width: u32) -> Self {
        if width <= narrow_max_width {
            Profile::Narrow
        } else {
            Profile::Normal
        }
    }

    /// Parallax is switched off on narrow screens.
    pub fn parallax_enabled(self) -> bool {
        matches!(self, Profile::Normal)
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Profile::Normal => "normal",
            Profile::Narrow => "narrow",
        }
    }
}
