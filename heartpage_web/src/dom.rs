//! DOM-backed [`PageSurface`].

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use heartpage::effects::{BUTTON_PRESSED, BUTTON_RELEASE_MS, BUTTON_RELEASED};
use heartpage::{CarouselSurface, PageSurface};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

pub const TRACK_ID: &str = "carouselSlides";
pub const INDICATORS_ID: &str = "carouselDots";
pub const INDICATOR_CLASS: &str = "carousel-dot";
pub const ACTIVE_CLASS: &str = "active";
pub const HEADER_SELECTOR: &str = ".header";
pub const COLOR_BUTTON_SELECTOR: &str = ".color-button";

/// Called with the indicator index when a dot is clicked.
pub type IndicatorHandler = Rc<dyn Fn(usize)>;

/// The page elements the controller writes to.
///
/// Missing elements are tolerated: writes to them are skipped, so a page
/// without a header or color button still gets a working carousel.
pub struct DomSurface {
    document: Document,
    track: Option<HtmlElement>,
    indicator_container: Option<Element>,
    indicators: Vec<HtmlElement>,
    indicator_listeners: Vec<Closure<dyn FnMut()>>,
    on_indicator: Option<IndicatorHandler>,
    body: Option<HtmlElement>,
    header: Option<HtmlElement>,
    color_button: Option<HtmlElement>,
    button_release: Option<Timeout>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        let track = html_by_id(&document, TRACK_ID);
        let indicator_container = document.get_element_by_id(INDICATORS_ID);
        if track.is_none() || indicator_container.is_none() {
            warn!("carousel markup missing (#{TRACK_ID} / #{INDICATORS_ID})");
        }
        Self {
            body: document.body(),
            header: html_by_selector(&document, HEADER_SELECTOR),
            color_button: html_by_selector(&document, COLOR_BUTTON_SELECTOR),
            track,
            indicator_container,
            indicators: Vec::new(),
            indicator_listeners: Vec::new(),
            on_indicator: None,
            button_release: None,
            document,
        }
    }

    /// Route indicator clicks to `handler`. Must be set before the indicators
    /// are built.
    pub fn set_indicator_handler(&mut self, handler: IndicatorHandler) {
        self.on_indicator = Some(handler);
    }

    pub fn color_button(&self) -> Option<&HtmlElement> {
        self.color_button.as_ref()
    }
}

impl CarouselSurface for DomSurface {
    fn build_indicators(&mut self, count: usize) {
        let Some(container) = &self.indicator_container else {
            return;
        };
        container.set_inner_html("");
        self.indicators.clear();
        self.indicator_listeners.clear();

        for index in 0..count {
            let Some(dot) = self
                .document
                .create_element("span")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                warn!("failed to create indicator {index}");
                continue;
            };
            dot.set_class_name(INDICATOR_CLASS);

            if let Some(handler) = self.on_indicator.clone() {
                let listener = Closure::<dyn FnMut()>::new(move || handler(index));
                let _ = dot
                    .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
                self.indicator_listeners.push(listener);
            }

            let _ = container.append_child(&dot);
            self.indicators.push(dot);
        }
    }

    fn set_track_transform(&mut self, css: &str) {
        if let Some(track) = &self.track {
            set_style(track, "transform", css);
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.indicators.get(index) {
            let _ = dot.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

impl PageSurface for DomSurface {
    fn set_background(&mut self, css: &str) {
        if let Some(body) = &self.body {
            set_style(body, "background", css);
        }
    }

    fn set_color_button_transform(&mut self, css: &str) {
        let Some(button) = &self.color_button else {
            return;
        };
        set_style(button, "transform", css);
        if css == BUTTON_PRESSED {
            let button = button.clone();
            // Replacing the previous timeout cancels it.
            self.button_release = Some(Timeout::new(BUTTON_RELEASE_MS, move || {
                set_style(&button, "transform", BUTTON_RELEASED);
            }));
        }
    }

    fn set_header_transform(&mut self, css: &str) {
        if let Some(header) = &self.header {
            set_style(header, "transform", css);
        }
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn html_by_selector(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Every element matching `selector` that is an `HtmlElement`, in document order.
pub fn html_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}
