//! Carousel controller: one integer of state, kept in sync with the track
//! offset and the indicator set.

use tracing::debug;

use crate::error::CarouselError;
use crate::surface::CarouselSurface;

/// Slide count used by the default page.
pub const DEFAULT_SLIDES: usize = 5;

/// Navigation direction for [`Carousel::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Circular carousel over a fixed number of slides.
///
/// `current` is always in `0..total`; the only way to change it is through
/// [`advance`](Self::advance), [`jump_to`](Self::jump_to) and
/// [`tick`](Self::tick), each of which re-renders.
#[derive(Debug, Clone)]
pub struct Carousel {
    current: usize,
    total: usize,
}

impl Carousel {
    /// Create a carousel positioned on slide 0. `total` must be at least 1;
    /// config validation guarantees that for pages built from a `PageConfig`.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Build one indicator per slide and render the initial state
    /// (indicator 0 active, track at 0%).
    pub fn initialize<S: CarouselSurface + ?Sized>(&mut self, surface: &mut S) {
        self.current = 0;
        surface.build_indicators(self.total);
        self.render(surface);
        debug!(slides = self.total, "carousel initialized");
    }

    /// Move one slide in `direction`, wrapping at both ends.
    pub fn advance<S: CarouselSurface + ?Sized>(&mut self, direction: Direction, surface: &mut S) {
        let total = self.total as isize;
        let next = (self.current as isize + direction.step()).rem_euclid(total);
        self.current = next as usize;
        self.render(surface);
    }

    /// Go straight to `index`. Out-of-range indices are rejected and nothing
    /// is re-rendered.
    pub fn jump_to<S: CarouselSurface + ?Sized>(
        &mut self,
        index: usize,
        surface: &mut S,
    ) -> Result<(), CarouselError> {
        if index >= self.total {
            return Err(CarouselError::SlideOutOfRange {
                index,
                total: self.total,
            });
        }
        self.current = index;
        self.render(surface);
        Ok(())
    }

    /// Timer step: same as advancing to the next slide.
    pub fn tick<S: CarouselSurface + ?Sized>(&mut self, surface: &mut S) {
        self.advance(Direction::Next, surface);
    }

    /// Push the current state to the surface.
    pub fn render<S: CarouselSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_track_transform(&track_transform(self.current));
        for index in 0..self.total {
            surface.set_indicator_active(index, index == self.current);
        }
    }
}

/// CSS transform that brings `slide` into view on a track of 100%-wide slides.
pub fn track_transform(slide: usize) -> String {
    format!("translateX(-{}%)", slide * 100)
}
