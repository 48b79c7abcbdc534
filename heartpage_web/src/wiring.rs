//! Event listener registration.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget()` once registered.

use gloo_timers::callback::Timeout;
use heartpage::config::RevealConfig;
use heartpage::effects::{
    self, HEART_CLICK_SETTLE_MS, HEART_TRANSITION, HeartEvent, REVEAL_HIDDEN, REVEAL_SELECTOR,
    REVEAL_TRANSITION, RevealTracker,
};
use heartpage::input::InputEvent;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::SharedPage;
use crate::dom::{html_all, set_style};

/// Delay between the last `resize` event and the profile update.
pub const RESIZE_SETTLE_MS: u32 = 100;

const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget(); // Keep the closure alive
}

/// Dispatch an event and log rejected ones.
fn dispatch(page: &SharedPage, event: InputEvent) -> Option<heartpage::input::Dispatch> {
    let Ok(mut page) = page.try_borrow_mut() else {
        debug!("page busy, dropping {event:?}");
        return None;
    };
    match page.dispatch(event) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

/// Arrow keys, Space and `c`.
pub fn keyboard(document: &Document, page: &SharedPage) {
    let page = page.clone();
    listen(document, "keydown", move |event: KeyboardEvent| {
        if let Some(outcome) = dispatch(&page, InputEvent::Key(event.key())) {
            if outcome.prevent_default {
                event.prevent_default();
            }
        }
    });
}

pub fn color_button(page: &SharedPage) {
    let button = page.borrow().surface().color_button().cloned();
    let Some(button) = button else {
        return;
    };
    let page = page.clone();
    listen(&button, "click", move |_: web_sys::Event| {
        dispatch(&page, InputEvent::ColorButton);
    });
}

/// Parallax header. The page ignores scroll under the narrow profile.
pub fn parallax(window: &Window, page: &SharedPage) {
    let page = page.clone();
    let win = window.clone();
    listen(window, "scroll", move |_: web_sys::Event| {
        let y = win.scroll_y().unwrap_or(0.0);
        dispatch(&page, InputEvent::Scroll { y });
    });
}

/// Resize events settle for [`RESIZE_SETTLE_MS`] before the profile is
/// recomputed; a newer resize cancels the pending one.
pub fn resize(window: &Window, page: &SharedPage) {
    let mut pending: Option<Timeout> = None;
    let page = page.clone();
    let win = window.clone();
    listen(window, "resize", move |_: web_sys::Event| {
        let page = page.clone();
        let win = win.clone();
        let next = Timeout::new(RESIZE_SETTLE_MS, move || {
            let width = crate::viewport_width(&win);
            dispatch(&page, InputEvent::Resize { width });
        });
        // Dropping the superseded timeout clears it.
        drop(pending.replace(next));
    });
}

pub fn teardown(window: &Window, page: &SharedPage) {
    let page = page.clone();
    listen(window, "beforeunload", move |_: web_sys::Event| {
        dispatch(&page, InputEvent::Teardown);
    });
}

/// Fade-in on first visibility for cards and timeline entries.
pub fn scroll_reveal(document: &Document, reveal: &RevealConfig) {
    let elements = html_all(document, REVEAL_SELECTOR);
    if elements.is_empty() {
        return;
    }
    let mut tracker = RevealTracker::new(elements.len());

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(REVEAL_INDEX_ATTR)
                    .and_then(|v| v.parse::<usize>().ok())
                else {
                    continue;
                };
                let Some(style) = tracker.observe(index, entry.is_intersecting())
                else {
                    continue;
                };
                if let Ok(element) = target.clone().dyn_into::<HtmlElement>() {
                    set_style(&element, "opacity", style.opacity);
                    set_style(&element, "transform", style.transform);
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(reveal.threshold));
    init.set_root_margin(&reveal.root_margin);

    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("IntersectionObserver unavailable: {e:?}");
                return;
            }
        };
    callback.forget();

    for (index, element) in elements.iter().enumerate() {
        let _ = element.set_attribute(REVEAL_INDEX_ATTR, &index.to_string());
        set_style(element, "opacity", REVEAL_HIDDEN.opacity);
        set_style(element, "transform", REVEAL_HIDDEN.transform);
        set_style(element, "transition", REVEAL_TRANSITION);
        observer.observe(element);
    }
    debug!(count = elements.len(), "scroll reveal armed");
}

/// Hover and click pops on `.heart` elements.
pub fn hearts(document: &Document) {
    for heart in html_all(document, ".heart") {
        let el = heart.clone();
        listen(&heart, "mouseover", move |_: web_sys::Event| {
            set_style(&el, "transform", effects::heart_transform(HeartEvent::Over));
            set_style(&el, "transition", HEART_TRANSITION);
        });

        let el = heart.clone();
        listen(&heart, "mouseout", move |_: web_sys::Event| {
            set_style(&el, "transform", effects::heart_transform(HeartEvent::Out));
        });

        let el = heart.clone();
        let mut settle: Option<Timeout> = None;
        listen(&heart, "click", move |_: web_sys::Event| {
            set_style(&el, "transform", effects::heart_transform(HeartEvent::Click));
            let el = el.clone();
            let next = Timeout::new(HEART_CLICK_SETTLE_MS, move || {
                set_style(
                    &el,
                    "transform",
                    effects::heart_transform(HeartEvent::ClickSettled),
                );
            });
            drop(settle.replace(next));
        });
    }
}

/// Card hover shadows and the timeline zigzag.
pub fn cards_and_timeline(document: &Document) {
    for card in html_all(document, ".person-card") {
        let el = card.clone();
        listen(&card, "mouseenter", move |_: web_sys::Event| {
            set_style(&el, "box-shadow", effects::card_shadow(true));
        });
        let el = card.clone();
        listen(&card, "mouseleave", move |_: web_sys::Event| {
            set_style(&el, "box-shadow", effects::card_shadow(false));
        });
    }

    for (index, item) in html_all(document, ".timeline-content").iter().enumerate() {
        let (left, right) = effects::timeline_margins(index);
        set_style(item, "margin-left", left);
        set_style(item, "margin-right", right);
    }
}
