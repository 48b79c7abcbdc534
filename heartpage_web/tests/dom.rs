//! Browser tests for the DOM surface. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::future::TimeoutFuture;
use heartpage::headless::VirtualTicker;
use heartpage::{Page, PageConfig, Ticker};
use heartpage_web::{DomSurface, IntervalTicker, SharedPage};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_markup() -> web_sys::Document {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();
    body.set_inner_html(
        r#"<header class="header"></header>
           <div id="carouselSlides"></div>
           <div id="carouselDots"></div>
           <button class="color-button">color</button>"#,
    );
    document
}

fn dots(document: &web_sys::Document) -> Vec<HtmlElement> {
    let nodes = document.query_selector_all(".carousel-dot").unwrap();
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[wasm_bindgen_test]
fn ready_builds_dots_and_positions_track() {
    let document = mount_markup();
    let mut page = Page::new(
        &PageConfig::default(),
        DomSurface::new(document.clone()),
        VirtualTicker::default(),
        1,
    );
    page.ready(1280);

    let dots = dots(&document);
    assert_eq!(dots.len(), 5);
    assert!(dots[0].class_list().contains("active"));
    assert!(!dots[1].class_list().contains("active"));

    page.jump_to(3).unwrap();
    let track = document.get_element_by_id("carouselSlides").unwrap();
    let track: HtmlElement = track.dyn_into().unwrap();
    assert_eq!(
        track.style().get_property_value("transform").unwrap(),
        "translateX(-300%)"
    );
    let active: Vec<usize> = dots
        .iter()
        .enumerate()
        .filter(|(_, d)| d.class_list().contains("active"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(active, vec![3]);
}

#[wasm_bindgen_test]
fn color_change_sets_body_background() {
    let document = mount_markup();
    let mut page = Page::new(
        &PageConfig::default(),
        DomSurface::new(document.clone()),
        VirtualTicker::default(),
        9,
    );
    page.ready(1280);
    let chosen = page.change_background().unwrap().to_string();
    let body = document.body().unwrap();
    assert!(!body.style().get_property_value("background").unwrap().is_empty());
    assert!(page.palette().entries().contains(&chosen));
}

#[wasm_bindgen_test]
async fn interval_ticker_runs_one_timer_and_stops_for_good() {
    let document = mount_markup();
    let mut config = PageConfig::default();
    config.slides = 200;
    config.autoplay.normal_period_ms = 20;
    config.autoplay.narrow_period_ms = 30;
    let page: SharedPage = Rc::new_cyclic(|weak| {
        RefCell::new(Page::new(
            &config,
            DomSurface::new(document.clone()),
            IntervalTicker::new(weak.clone()),
            1,
        ))
    });

    let started = js_sys::Date::now();
    page.borrow_mut().ready(1280);
    // Each profile change replaces the running interval.
    page.borrow_mut().resize(600);
    page.borrow_mut().resize(1280);
    TimeoutFuture::new(200).await;

    let elapsed = js_sys::Date::now() - started;
    let ticks = page.borrow().current_slide();
    assert!(ticks >= 1, "autoplay never ticked");
    assert!(
        ticks as f64 <= elapsed / 20.0 + 1.0,
        "{ticks} ticks in {elapsed}ms means more than one live interval"
    );

    page.borrow_mut().teardown();
    page.borrow_mut().teardown();
    let stopped_at = page.borrow().current_slide();
    TimeoutFuture::new(100).await;
    assert_eq!(page.borrow().current_slide(), stopped_at);
}

#[wasm_bindgen_test]
async fn interval_ticker_without_a_page_is_inert() {
    let mut ticker = IntervalTicker::new(Weak::new());
    ticker.start(5);
    ticker.start(5);
    ticker.stop();
    ticker.stop();
    ticker.start(5);
    TimeoutFuture::new(30).await;
    ticker.stop();
}
