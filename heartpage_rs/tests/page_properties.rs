//! Behavioral properties of the page controller, exercised through the
//! public API only.

use heartpage::autoplay::AutoplayState;
use heartpage::headless::{HeadlessPage, HeadlessSurface, VirtualTicker};
use heartpage::input::InputEvent;
use heartpage::viewport::Profile;
use heartpage::{CarouselError, Direction, Page, PageConfig};

fn ready_page(width: u32) -> HeadlessPage {
    let mut page = Page::new(
        &PageConfig::default(),
        HeadlessSurface::default(),
        VirtualTicker::default(),
        2024,
    );
    page.ready(width);
    page
}

fn key(page: &mut HeadlessPage, key: &str) {
    page.dispatch(InputEvent::Key(key.into())).unwrap();
}

#[test]
fn forward_steps_wrap_modulo_slide_count() {
    let mut page = ready_page(1280);
    for _ in 0..5 {
        page.advance(Direction::Next);
    }
    assert_eq!(page.current_slide(), 0);

    let mut page = ready_page(1280);
    for _ in 0..7 {
        page.advance(Direction::Next);
    }
    assert_eq!(page.current_slide(), 2);
}

#[test]
fn backwards_from_first_slide_lands_on_last() {
    let mut page = ready_page(1280);
    key(&mut page, "ArrowLeft");
    assert_eq!(page.current_slide(), 4);
}

#[test]
fn jump_marks_single_indicator() {
    let mut page = ready_page(1280);
    page.jump_to(3).unwrap();
    assert_eq!(page.current_slide(), 3);
    assert_eq!(page.surface().active_indicators(), vec![3]);
}

#[test]
fn one_active_indicator_through_mixed_input() {
    let mut page = ready_page(1280);
    let script = [
        InputEvent::Key("ArrowRight".into()),
        InputEvent::Tick,
        InputEvent::IndicatorClick(1),
        InputEvent::Key("ArrowLeft".into()),
        InputEvent::Key("ArrowLeft".into()),
        InputEvent::IndicatorClick(40),
        InputEvent::Resize { width: 500 },
        InputEvent::Tick,
        InputEvent::Key("c".into()),
    ];
    for event in script.iter().cycle().take(90) {
        let _ = page.dispatch(event.clone());
        assert_eq!(page.surface().active_indicators(), vec![page.current_slide()]);
        let expected = format!("translateX(-{}%)", page.current_slide() * 100);
        assert_eq!(page.surface().track_transform, expected);
    }
}

#[test]
fn out_of_range_jump_is_rejected() {
    let mut page = ready_page(1280);
    page.jump_to(2).unwrap();
    assert_eq!(
        page.jump_to(5),
        Err(CarouselError::SlideOutOfRange { index: 5, total: 5 })
    );
    assert_eq!(page.current_slide(), 2);
}

#[test]
fn toggle_round_trip_keeps_period() {
    let mut page = ready_page(1280);
    key(&mut page, " ");
    key(&mut page, " ");
    assert_eq!(page.autoplay_state(), AutoplayState::Running);
    assert_eq!(page.autoplay_period_ms(), 5_000);
    assert_eq!(page.ticker().active_period(), Some(5_000));
}

#[test]
fn paused_page_does_not_move_without_input() {
    let mut page = ready_page(1280);
    page.elapse(5_000);
    key(&mut page, " ");
    let before = page.current_slide();
    assert_eq!(page.elapse(10 * 60 * 1_000), 0);
    assert_eq!(page.current_slide(), before);
}

#[test]
fn narrow_resize_changes_period_not_slide() {
    let mut page = ready_page(1280);
    page.jump_to(4).unwrap();
    page.resize(768);
    assert_eq!(page.profile(), Profile::Narrow);
    assert_eq!(page.current_slide(), 4);
    assert_eq!(page.autoplay_period_ms(), 7_000);

    page.resize(1024);
    assert_eq!(page.profile(), Profile::Normal);
    assert_eq!(page.autoplay_period_ms(), 5_000);
    assert_eq!(page.current_slide(), 4);
}

#[test]
fn reconfiguration_never_leaves_two_timers() {
    let mut page = ready_page(1280);
    for width in [500, 1400, 320, 769, 768] {
        page.resize(width);
    }
    let ticker = page.ticker();
    // Every start after the first is preceded by exactly one stop.
    assert_eq!(ticker.starts().len(), ticker.stops() + 1);
    assert_eq!(ticker.active_period(), Some(7_000));
}

#[test]
fn background_draws_cover_palette_uniformly() {
    let mut page = ready_page(1280);
    let palette = page.palette().clone();
    let mut counts = vec![0usize; palette.len()];
    let draws = 50_000;
    for _ in 0..draws {
        let chosen = page.change_background().unwrap().to_string();
        let index = palette.entries().iter().position(|g| *g == chosen).unwrap();
        counts[index] += 1;
    }
    let expected = draws / palette.len();
    for count in counts {
        assert!(count > expected * 9 / 10 && count < expected * 11 / 10);
    }
}

#[test]
fn teardown_is_idempotent() {
    let mut page = ready_page(1280);
    page.teardown();
    page.teardown();
    page.dispatch(InputEvent::Teardown).unwrap();
    assert_eq!(page.autoplay_state(), AutoplayState::Stopped);
    assert_eq!(page.ticker().stops(), 1);
}
