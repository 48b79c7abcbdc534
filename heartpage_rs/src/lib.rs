//! # heartpage
//!
//! Interactive behavior for a small personal web page: a circular image
//! carousel with indicators and autoplay, a random background changer,
//! scroll-reveal and hover effects, header parallax and keyboard controls.
//!
//! The crate is DOM-free. Rendering and timers sit behind two small traits
//! ([`surface::PageSurface`] and [`surface::Ticker`]); the `heartpage-web`
//! crate implements them over `web-sys`, and [`headless`] implements them in
//! memory for tests and the `heartpage` CLI.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use heartpage::config::PageConfig;
//! use heartpage::headless::{HeadlessSurface, VirtualTicker};
//! use heartpage::input::InputEvent;
//! use heartpage::page::Page;
//!
//! let mut page = Page::new(
//!     &PageConfig::default(),
//!     HeadlessSurface::default(),
//!     VirtualTicker::default(),
//!     7,
//! );
//! page.ready(1280);
//!
//! page.dispatch(InputEvent::Key("ArrowLeft".into())).unwrap();
//! assert_eq!(page.current_slide(), 4);
//!
//! page.elapse(5_000);
//! assert_eq!(page.current_slide(), 0);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! heartpage replay session.txt          # step-by-step state after each line
//! heartpage replay session.txt --json   # final snapshot as JSON
//! heartpage run --width 600             # interactive, real timer
//! heartpage palette                     # list background gradients
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Auto-advance timer lifecycle (start, pause/resume, atomic period change,
/// idempotent cancel).
pub mod autoplay;

/// The carousel state machine.
pub mod carousel;

/// Terminal driver behind the `heartpage` binary.
#[cfg(feature = "cli")]
pub mod cli;

/// Configuration file support (`.heartpage/config.toml`, or JSON in the browser).
pub mod config;

/// Pure style computations for the decorative effects.
pub mod effects;

/// Error types.
pub mod error;

/// In-memory surface and virtual clock.
pub mod headless;

/// Input events, actions and the key dispatch table.
pub mod input;

/// Page controller tying all components together.
pub mod page;

/// Background palette.
pub mod palette;

/// Replay script parsing and execution.
pub mod script;

/// Rendering and timer seams.
pub mod surface;

/// Viewport profile (normal / narrow).
pub mod viewport;

// ============================================================================
// Convenience Re-exports
// ============================================================================

pub use carousel::{Carousel, Direction};
pub use config::PageConfig;
pub use error::{CarouselError, ConfigError, HeartpageError, ScriptError};
pub use page::{Page, PageSnapshot};
pub use palette::Palette;
pub use surface::{CarouselSurface, PageSurface, Ticker};
