//! Input dispatch table.
//!
//! Hosts translate their native events into [`InputEvent`]s and hand them to
//! [`Page::dispatch`](crate::page::Page::dispatch). Keyboard events go through
//! a [`Keymap`] first so bindings can be changed from config.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Things a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    PreviousSlide,
    NextSlide,
    ToggleAutoplay,
    ChangeBackground,
}

impl Action {
    /// Whether the host should suppress its default handling (Space would
    /// otherwise scroll the page).
    pub fn prevents_default(self) -> bool {
        matches!(self, Action::ToggleAutoplay)
    }
}

/// Events the page controller understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press, carrying the DOM `KeyboardEvent.key` value.
    Key(String),
    IndicatorClick(usize),
    ColorButton,
    /// The autoplay timer fired.
    Tick,
    Resize { width: u32 },
    Scroll { y: f64 },
    Teardown,
}

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub handled: bool,
    pub prevent_default: bool,
}

impl Dispatch {
    pub const IGNORED: Dispatch = Dispatch {
        handled: false,
        prevent_default: false,
    };

    pub const HANDLED: Dispatch = Dispatch {
        handled: true,
        prevent_default: false,
    };
}

/// Key value → action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: BTreeMap<String, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert("ArrowLeft".to_string(), Action::PreviousSlide);
        bindings.insert("ArrowRight".to_string(), Action::NextSlide);
        bindings.insert(" ".to_string(), Action::ToggleAutoplay);
        bindings.insert("c".to_string(), Action::ChangeBackground);
        Self { bindings }
    }
}

impl Keymap {
    /// Defaults plus `overrides`. An override for an already-bound key
    /// replaces it.
    pub fn with_overrides(overrides: &BTreeMap<String, Action>) -> Self {
        let mut keymap = Self::default();
        for (key, action) in overrides {
            keymap.bind(normalize_key(key), *action);
        }
        keymap
    }

    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.bindings.insert(key.into(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, Action)> {
        self.bindings.iter().map(|(k, a)| (k.as_str(), *a))
    }
}

/// Map friendly key names (as typed in config and replay scripts) to DOM key
/// values. Anything unrecognised passes through unchanged.
pub fn normalize_key(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "left" | "arrowleft" => "ArrowLeft".to_string(),
        "right" | "arrowright" => "ArrowRight".to_string(),
        "space" | "spacebar" => " ".to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let keymap = Keymap::default();
        assert_eq!(keymap.action_for("ArrowLeft"), Some(Action::PreviousSlide));
        assert_eq!(keymap.action_for("ArrowRight"), Some(Action::NextSlide));
        assert_eq!(keymap.action_for(" "), Some(Action::ToggleAutoplay));
        assert_eq!(keymap.action_for("c"), Some(Action::ChangeBackground));
        assert_eq!(keymap.action_for("C"), None);
        assert_eq!(keymap.action_for("Enter"), None);
    }

    #[test]
    fn only_toggle_prevents_default() {
        assert!(Action::ToggleAutoplay.prevents_default());
        assert!(!Action::NextSlide.prevents_default());
        assert!(!Action::ChangeBackground.prevents_default());
    }

    #[test]
    fn overrides_use_friendly_names() {
        let mut overrides = BTreeMap::new();
        overrides.insert("space".to_string(), Action::NextSlide);
        overrides.insert("b".to_string(), Action::ChangeBackground);
        let keymap = Keymap::with_overrides(&overrides);
        assert_eq!(keymap.action_for(" "), Some(Action::NextSlide));
        assert_eq!(keymap.action_for("b"), Some(Action::ChangeBackground));
        assert_eq!(keymap.action_for("c"), Some(Action::ChangeBackground));
    }

    #[test]
    fn normalize_known_names() {
        assert_eq!(normalize_key("Left"), "ArrowLeft");
        assert_eq!(normalize_key("right"), "ArrowRight");
        assert_eq!(normalize_key("SPACE"), " ");
        assert_eq!(normalize_key("c"), "c");
    }

    #[test]
    fn actions_deserialize_kebab_case() {
        let action: Action = serde_json::from_str("\"toggle-autoplay\"").expect("parse");
        assert_eq!(action, Action::ToggleAutoplay);
    }
}
