//! Configuration file support for heartpage.
//!
//! Loads optional `.heartpage/config.toml` from a project root. The browser
//! binding reads the same structure as JSON from the page.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::autoplay::{NARROW_PERIOD_MS, NORMAL_PERIOD_MS};
use crate::carousel::DEFAULT_SLIDES;
use crate::error::ConfigError;
use crate::input::Action;
use crate::palette::{DEFAULT_GRADIENTS, Palette};
use crate::viewport::NARROW_MAX_WIDTH;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Number of slides in the carousel track.
    pub slides: usize,
    pub autoplay: AutoplayConfig,
    /// Widths at or below this use the narrow profile.
    pub narrow_max_width: u32,
    /// Header moves at `scroll * parallax_factor`.
    pub parallax_factor: f64,
    /// Background values for the color changer.
    pub palette: Vec<String>,
    /// Extra key bindings, keyed by key name (`left`, `space`, `x`, ...).
    pub keys: BTreeMap<String, Action>,
    pub reveal: RevealConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub normal_period_ms: u32,
    pub narrow_period_ms: u32,
}

/// IntersectionObserver options for the scroll reveal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            slides: DEFAULT_SLIDES,
            autoplay: AutoplayConfig::default(),
            narrow_max_width: NARROW_MAX_WIDTH,
            parallax_factor: 0.5,
            palette: DEFAULT_GRADIENTS.iter().map(|g| g.to_string()).collect(),
            keys: BTreeMap::new(),
            reveal: RevealConfig::default(),
        }
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            normal_period_ms: NORMAL_PERIOD_MS,
            narrow_period_ms: NARROW_PERIOD_MS,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

impl PageConfig {
    /// Load config from `.heartpage/config.toml` in the given root directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".heartpage").join("config.toml");
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {}", config_path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate config from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slides == 0 {
            return Err(ConfigError::NoSlides);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.autoplay.normal_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod("normal_period_ms"));
        }
        if self.autoplay.narrow_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod("narrow_period_ms"));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }
}
