//! Browser bindings for heartpage.
//!
//! On module start this crate waits for the DOM, builds a
//! [`heartpage::Page`] over the real page elements, registers every listener
//! (keyboard, color button, indicators, scroll reveal, hearts, cards,
//! parallax, resize, unload) and starts the carousel autoplay.
//!
//! A few functions are exported for inline `onclick` handlers in the page
//! markup (`change_slide`, `go_to_slide`, `change_background_color`,
//! `toggle_auto_play`).

#![allow(clippy::collapsible_if)]

mod dom;
mod ticker;
mod wiring;

use std::cell::RefCell;
use std::rc::Rc;

use heartpage::{Direction, Page, PageConfig};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

pub use dom::DomSurface;
pub use ticker::IntervalTicker;

/// Page controller wired to the DOM and browser timers.
pub type WebPage = Page<DomSurface, IntervalTicker>;
pub type SharedPage = Rc<RefCell<WebPage>>;

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "heartpage-config";

thread_local! {
    static PAGE: RefCell<Option<SharedPage>> = const { RefCell::new(None) };
}

/// Initialize panic hook and logging, then boot once the DOM is ready.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let win = window.clone();
        let on_ready = Closure::<dyn FnMut()>::once(move || boot(&win));
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        boot(&window);
    }
}

fn boot(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let config = read_config(&document);
    let seed = random_seed();

    let surface = DomSurface::new(document.clone());
    let page: SharedPage = Rc::new_cyclic(|weak| {
        RefCell::new(Page::new(
            &config,
            surface,
            IntervalTicker::new(weak.clone()),
            seed,
        ))
    });

    let on_indicator = {
        let weak = Rc::downgrade(&page);
        Rc::new(move |index: usize| {
            if let Some(page) = weak.upgrade() {
                if let Ok(mut page) = page.try_borrow_mut() {
                    let _ = page.jump_to(index);
                }
            }
        })
    };
    page.borrow_mut().surface_mut().set_indicator_handler(on_indicator);

    wiring::scroll_reveal(&document, &config.reveal);
    wiring::hearts(&document);
    wiring::parallax(window, &page);
    wiring::cards_and_timeline(&document);
    wiring::keyboard(&document, &page);
    wiring::color_button(&page);
    wiring::resize(window, &page);
    wiring::teardown(window, &page);

    page.borrow_mut().ready(viewport_width(window));

    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    info!("page wired");
}

/// Config from the page's JSON block, or defaults.
fn read_config(document: &Document) -> PageConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            PageConfig::default()
        }
    }
}

fn random_seed() -> u64 {
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    noise ^ (js_sys::Date::now() as u64)
}

pub(crate) fn viewport_width(window: &Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

fn with_page(f: impl FnOnce(&mut WebPage)) {
    PAGE.with(|slot| {
        if let Some(page) = slot.borrow().as_ref() {
            if let Ok(mut page) = page.try_borrow_mut() {
                f(&mut page);
            }
        }
    });
}

// ============================================================================
// WASM Exports
// ============================================================================

/// Move the carousel one slide: negative is previous, positive is next and
/// zero does nothing.
#[wasm_bindgen]
pub fn change_slide(direction: i32) {
    if let Some(direction) = slide_direction(direction) {
        with_page(|page| page.advance(direction));
    }
}

fn slide_direction(direction: i32) -> Option<Direction> {
    match direction.signum() {
        -1 => Some(Direction::Previous),
        1 => Some(Direction::Next),
        _ => None,
    }
}

/// Jump straight to a slide.
#[wasm_bindgen]
pub fn go_to_slide(index: usize) -> Result<(), JsValue> {
    let mut result = Ok(());
    with_page(|page| {
        result = page
            .jump_to(index)
            .map_err(|e| JsValue::from_str(&e.to_string()));
    });
    result
}

#[wasm_bindgen]
pub fn change_background_color() {
    with_page(|page| {
        page.change_background();
    });
}

#[wasm_bindgen]
pub fn toggle_auto_play() {
    with_page(|page| page.toggle_autoplay());
}

/// Current page state as JSON, for debugging from the console.
#[wasm_bindgen]
pub fn page_state() -> Result<String, JsValue> {
    let mut state = Err(JsValue::from_str("page not initialized"));
    with_page(|page| {
        state = serde_json::to_string(&page.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize page state: {}", e)));
    });
    state
}

#[cfg(test)]
mod tests {
    use heartpage::Direction;
    use heartpage::config::PageConfig;

    #[test]
    fn embedded_config_shape() {
        let config = PageConfig::from_json_str(
            r#"{"slides": 6, "autoplay": {"normal_period_ms": 4000}, "keys": {"x": "change-background"}}"#,
        )
        .expect("valid config");
        assert_eq!(config.slides, 6);
        assert_eq!(config.autoplay.normal_period_ms, 4_000);
        assert_eq!(config.autoplay.narrow_period_ms, 7_000);
        assert_eq!(config.keys.len(), 1);
    }

    #[test]
    fn slide_direction_follows_sign() {
        assert_eq!(super::slide_direction(-1), Some(Direction::Previous));
        assert_eq!(super::slide_direction(-7), Some(Direction::Previous));
        assert_eq!(super::slide_direction(1), Some(Direction::Next));
        assert_eq!(super::slide_direction(3), Some(Direction::Next));
        assert_eq!(super::slide_direction(0), None);
    }

    #[test]
    fn bad_embedded_config_is_rejected() {
        assert!(PageConfig::from_json_str(r#"{"palette": []}"#).is_err());
        assert!(PageConfig::from_json_str("{not json").is_err());
    }
}
