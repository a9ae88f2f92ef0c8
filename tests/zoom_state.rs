use liquidity_range_wasm::config::ZoomConfig;
use liquidity_range_wasm::domain::pool::{TickSpacing, TokenDecimals, ZoomKey};
use liquidity_range_wasm::domain::range::{PriceContext, PriceRange};
use liquidity_range_wasm::view_state::{TickDomain, ZoomState, ZoomTransform};
use quickcheck_macros::quickcheck;

fn key(pool: &str, spacing: i32) -> ZoomKey {
    ZoomKey { pool_id: pool.to_string(), tick_spacing: TickSpacing::new(spacing).unwrap() }
}

fn configured() -> ZoomState {
    let config = ZoomConfig::default();
    let mut zoom = ZoomState::new(config);
    zoom.configure(key("0xpool", 60), TickDomain::around_tick(0, &config, false));
    zoom
}

fn context(invert: bool) -> PriceContext {
    PriceContext { spacing: TickSpacing::new(60).unwrap(), decimals: TokenDecimals::new(18, 18), invert }
}

#[test]
fn base_window_matches_configured_multiples() {
    let zoom = configured();
    let (min, max) = zoom.visible_price_window(&context(false)).unwrap();
    assert!((min - 0.5).abs() < 1e-9);
    assert!((max - 2.0).abs() < 1e-9);

    let (min, max) = zoom.visible_price_window(&context(true)).unwrap();
    assert!((min - 0.5).abs() < 1e-9);
    assert!((max - 2.0).abs() < 1e-9);
}

#[test]
fn unconfigured_zoom_has_no_window() {
    let zoom = ZoomState::new(ZoomConfig::default());
    assert_eq!(zoom.visible_domain(), None);
    assert!(!zoom.should_show_reset(&PriceRange::new(-60, 60)));
}

#[test]
fn new_key_resets_and_same_key_keeps_transform() {
    let config = ZoomConfig::default();
    let mut zoom = configured();
    zoom.zoom_at(2.0, 0.5, 0);
    assert_eq!(zoom.transform().scale, 2.0);

    assert!(!zoom.configure(key("0xpool", 60), TickDomain::around_tick(600, &config, false)));
    assert_eq!(zoom.transform().scale, 2.0);

    assert!(zoom.configure(key("0xpool", 10), TickDomain::around_tick(600, &config, false)));
    assert_eq!(zoom.transform(), ZoomTransform::IDENTITY);
}

#[quickcheck]
fn zoom_keeps_anchor_tick_fixed(factor: u8, anchor: u8) -> bool {
    let factor = 0.25 + factor as f64 / 64.0;
    let anchor = anchor as f64 / 255.0;
    let mut zoom = configured();
    let before = zoom.visible_domain().unwrap();
    let anchor_tick = before.start + before.span() * anchor;

    zoom.zoom_at(factor, anchor, 0);
    let after = zoom.visible_domain().unwrap();
    let moved = after.start + after.span() * anchor;
    (moved - anchor_tick).abs() < 1e-6 * before.span()
}

#[test]
fn scale_is_clamped() {
    let config = ZoomConfig::default();
    let mut zoom = configured();
    zoom.zoom_at(1e6, 0.5, 0);
    assert_eq!(zoom.transform().scale, config.max_scale);
    zoom.set_transform(ZoomTransform { scale: 1e-9, translate: 0.0 }, 0);
    assert_eq!(zoom.transform().scale, config.min_scale);
}

#[test]
fn pan_shifts_by_visible_width() {
    let mut zoom = configured();
    let before = zoom.visible_domain().unwrap();
    zoom.pan(0.5, 0);
    let after = zoom.visible_domain().unwrap();
    assert!((after.start - before.start - before.span() / 2.0).abs() < 1e-9);
    assert!((after.span() - before.span()).abs() < 1e-9);
}

#[test]
fn reset_is_offered_when_handles_leave_the_view() {
    let mut zoom = configured();
    assert!(!zoom.should_show_reset(&PriceRange::new(-600, 600)));
    assert!(!zoom.should_show_reset(&PriceRange::new(-600, 100_000)));
    assert!(zoom.should_show_reset(&PriceRange::new(50_000, 100_000)));

    zoom.zoom_at(10.0, 0.5, 0);
    assert!(zoom.should_show_reset(&PriceRange::new(-60, 60)));
}

#[test]
fn settle_timer_is_per_instance() {
    let mut busy = configured();
    let idle = configured();
    busy.pan(0.1, 1_000);

    assert!(!busy.is_settled(1_100));
    assert!(busy.is_settled(1_250));
    assert!(idle.is_settled(1_100));

    busy.reset();
    assert!(busy.is_settled(1_000));
}

#[test]
fn rebase_keeps_the_view_and_moves_the_reset_target() {
    let config = ZoomConfig { initial_min: 0.8, ..ZoomConfig::default() };
    let mut zoom = ZoomState::new(config);
    zoom.configure(key("0xpool", 60), TickDomain::around_tick(0, &config, false));
    zoom.zoom_at(3.0, 0.25, 0);
    let before = zoom.visible_domain().unwrap();

    let mirrored = TickDomain::around_tick(0, &config, true);
    zoom.rebase(mirrored);
    let after = zoom.visible_domain().unwrap();
    assert!((after.start - before.start).abs() < 1e-6);
    assert!((after.end - before.end).abs() < 1e-6);

    zoom.reset();
    let base = zoom.visible_domain().unwrap();
    assert!((base.start - mirrored.start).abs() < 1e-6);
    assert!((base.end - mirrored.end).abs() < 1e-6);
}
