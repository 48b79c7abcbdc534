//! Error types for the heartpage core.

use std::path::PathBuf;

use thiserror::Error;

/// Carousel navigation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// Direct navigation to a slide that does not exist. State is left untouched.
    #[error("slide {index} is out of range (carousel has {total} slides)")]
    SlideOutOfRange { index: usize, total: usize },
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("carousel needs at least one slide")]
    NoSlides,

    #[error("palette is empty")]
    EmptyPalette,

    #[error("autoplay period must be non-zero ({0})")]
    ZeroPeriod(&'static str),
}

/// Replay script parse failures, reported with the 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: `{value}` is not a valid {expected}")]
    InvalidArgument {
        line: usize,
        value: String,
        expected: &'static str,
    },
}

/// Umbrella error for callers that don't care which layer failed.
#[derive(Debug, Error)]
pub enum HeartpageError {
    #[error(transparent)]
    Carousel(#[from] CarouselError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

pub type Result<T, E = HeartpageError> = std::result::Result<T, E>;
