//! Page controller: owns every piece of page state and routes input to it.
//!
//! A host (the browser binding or the CLI) builds one [`Page`] around its
//! surface and ticker, calls [`Page::ready`] once, feeds events through
//! [`Page::dispatch`], and finally calls [`Page::teardown`].

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::autoplay::{Autoplay, AutoplayState};
use crate::carousel::{Carousel, Direction};
use crate::config::PageConfig;
use crate::effects::{self, BUTTON_PRESSED, BUTTON_RELEASED};
use crate::error::CarouselError;
use crate::input::{Action, Dispatch, InputEvent, Keymap};
use crate::palette::Palette;
use crate::surface::{PageSurface, Ticker};
use crate::viewport::Profile;

/// Serializable view of the page state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub slide: usize,
    pub total: usize,
    pub autoplay: AutoplayState,
    pub period_ms: u32,
    pub profile: Profile,
    pub background: Option<String>,
    pub header_offset: f64,
}

#[derive(Debug)]
pub struct Page<S: PageSurface, T: Ticker> {
    pub(crate) surface: S,
    pub(crate) carousel: Carousel,
    pub(crate) autoplay: Autoplay<T>,
    palette: Palette,
    keymap: Keymap,
    rng: SmallRng,
    profile: Profile,
    narrow_max_width: u32,
    normal_period_ms: u32,
    narrow_period_ms: u32,
    parallax_factor: f64,
    background: Option<String>,
    header_offset: f64,
}

impl<S: PageSurface, T: Ticker> Page<S, T> {
    /// `seed` drives the palette draws; pass anything for the browser, a fixed
    /// value for reproducible runs.
    pub fn new(config: &PageConfig, surface: S, ticker: T, seed: u64) -> Self {
        Self {
            surface,
            carousel: Carousel::new(config.slides),
            autoplay: Autoplay::new(ticker, config.autoplay.normal_period_ms),
            palette: config.palette(),
            keymap: Keymap::with_overrides(&config.keys),
            rng: SmallRng::seed_from_u64(seed),
            profile: Profile::Normal,
            narrow_max_width: config.narrow_max_width,
            normal_period_ms: config.autoplay.normal_period_ms,
            narrow_period_ms: config.autoplay.narrow_period_ms,
            parallax_factor: config.parallax_factor,
            background: None,
            header_offset: 0.0,
        }
    }

    /// Page-ready: build the carousel, pick the viewport profile and start
    /// autoplay with that profile's period.
    pub fn ready(&mut self, width: u32) {
        info!("loading page");
        self.carousel.initialize(&mut self.surface);
        self.profile = Profile::from_width(width, self.narrow_max_width);
        if self.profile == Profile::Narrow {
            info!(width, "narrow profile applied");
        }
        self.autoplay.start(self.period_for(self.profile));
        info!(
            slides = self.carousel.total(),
            period_ms = self.autoplay.period_ms(),
            "page ready"
        );
    }

    /// Route one input event. Only an out-of-range indicator click can fail.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<Dispatch, CarouselError> {
        match event {
            InputEvent::Key(key) => Ok(self.handle_key(&key)),
            InputEvent::IndicatorClick(index) => {
                self.jump_to(index)?;
                Ok(Dispatch::HANDLED)
            }
            InputEvent::ColorButton => {
                self.change_background();
                Ok(Dispatch::HANDLED)
            }
            InputEvent::Tick => {
                self.tick();
                Ok(Dispatch::HANDLED)
            }
            InputEvent::Resize { width } => {
                self.resize(width);
                Ok(Dispatch::HANDLED)
            }
            InputEvent::Scroll { y } => Ok(Dispatch {
                handled: self.scroll(y),
                prevent_default: false,
            }),
            InputEvent::Teardown => {
                self.teardown();
                Ok(Dispatch::HANDLED)
            }
        }
    }

    fn handle_key(&mut self, key: &str) -> Dispatch {
        let Some(action) = self.keymap.action_for(key) else {
            return Dispatch::IGNORED;
        };
        debug!(key, ?action, "key action");
        match action {
            Action::PreviousSlide => self.advance(Direction::Previous),
            Action::NextSlide => self.advance(Direction::Next),
            Action::ToggleAutoplay => self.toggle_autoplay(),
            Action::ChangeBackground => {
                self.change_background();
            }
        }
        Dispatch {
            handled: true,
            prevent_default: action.prevents_default(),
        }
    }

    pub fn advance(&mut self, direction: Direction) {
        self.carousel.advance(direction, &mut self.surface);
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        self.carousel.jump_to(index, &mut self.surface).inspect_err(|e| {
            warn!("{e}");
        })
    }

    /// Timer callback.
    pub fn tick(&mut self) {
        self.carousel.tick(&mut self.surface);
    }

    pub fn toggle_autoplay(&mut self) {
        // Resume with the current profile's period even if it changed while paused.
        self.autoplay.reconfigure(self.period_for(self.profile));
        self.autoplay.toggle();
    }

    /// Draw a palette entry, apply it to the page and press the color button.
    /// The host is expected to call [`release_color_button`](Self::release_color_button)
    /// after [`effects::BUTTON_RELEASE_MS`].
    pub fn change_background(&mut self) -> Option<&str> {
        let (index, gradient) = self.palette.pick(&mut self.rng)?;
        let gradient = gradient.to_string();
        self.surface.set_background(&gradient);
        self.surface.set_color_button_transform(BUTTON_PRESSED);
        info!(index, gradient = %gradient, "background changed");
        self.background = Some(gradient);
        self.background.as_deref()
    }

    pub fn release_color_button(&mut self) {
        self.surface.set_color_button_transform(BUTTON_RELEASED);
    }

    /// Re-derive the viewport profile. The timer is restarted in one step when
    /// the period changes; the current slide is never touched.
    pub fn resize(&mut self, width: u32) {
        let profile = Profile::from_width(width, self.narrow_max_width);
        if profile == self.profile {
            return;
        }
        self.profile = profile;
        self.autoplay.reconfigure(self.period_for(profile));
        info!(
            width,
            profile = profile.as_label(),
            period_ms = self.autoplay.period_ms(),
            "viewport profile changed"
        );
    }

    /// Parallax scroll. Returns `false` when parallax is disabled.
    pub fn scroll(&mut self, y: f64) -> bool {
        if !self.profile.parallax_enabled() {
            return false;
        }
        self.header_offset = y * self.parallax_factor;
        self.surface
            .set_header_transform(&effects::parallax_transform(y, self.parallax_factor));
        true
    }

    /// Cancel the timer. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.autoplay.cancel();
        debug!("page torn down");
    }

    fn period_for(&self, profile: Profile) -> u32 {
        match profile {
            Profile::Normal => self.normal_period_ms,
            Profile::Narrow => self.narrow_period_ms,
        }
    }

    pub fn current_slide(&self) -> usize {
        self.carousel.current()
    }

    pub fn total_slides(&self) -> usize {
        self.carousel.total()
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    pub fn autoplay_period_ms(&self) -> u32 {
        self.autoplay.period_ms()
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ticker(&self) -> &T {
        self.autoplay.ticker()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            slide: self.carousel.current(),
            total: self.carousel.total(),
            autoplay: self.autoplay.state(),
            period_ms: self.autoplay.period_ms(),
            profile: self.profile,
            background: self.background.clone(),
            header_offset: self.header_offset,
        }
    }
}
