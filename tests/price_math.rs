use liquidity_range_wasm::domain::liquidity::{
    Limit, MAX_TICK, MIN_TICK, limit_of, max_usable_tick, min_usable_tick, nearest_usable_tick, price_to_closest_tick,
    tick_to_price,
};
use liquidity_range_wasm::domain::pool::{TickSpacing, TokenDecimals};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const SPACINGS: [i32; 4] = [1, 10, 60, 200];

fn in_tick_range(raw: i32) -> i32 {
    MIN_TICK + raw.rem_euclid(MAX_TICK - MIN_TICK + 1)
}

fn spacing(raw: u8) -> TickSpacing {
    TickSpacing::new(SPACINGS[raw as usize % SPACINGS.len()]).unwrap()
}

#[quickcheck]
fn price_is_monotonic_in_tick(a: i32, b: i32, invert: bool) -> TestResult {
    let (a, b) = (in_tick_range(a), in_tick_range(b));
    if a == b {
        return TestResult::discard();
    }
    let (low, high) = (a.min(b), a.max(b));
    let decimals = TokenDecimals::new(18, 18);
    let (p_low, p_high) = (tick_to_price(low, decimals, invert), tick_to_price(high, decimals, invert));
    TestResult::from_bool(if invert { p_low > p_high } else { p_low < p_high })
}

#[quickcheck]
fn closest_tick_round_trips(raw: i32, invert: bool) -> bool {
    let tick = in_tick_range(raw);
    let decimals = TokenDecimals::new(18, 6);
    let price = tick_to_price(tick, decimals, invert);
    price_to_closest_tick(price, decimals, invert) == Ok(tick)
}

#[quickcheck]
fn usable_ticks_are_aligned_and_in_bounds(raw: i32, spacing_raw: u8) -> bool {
    let tick = in_tick_range(raw);
    let spacing = spacing(spacing_raw);
    let usable = nearest_usable_tick(tick, spacing);
    usable % spacing.value() == 0
        && (min_usable_tick(spacing)..=max_usable_tick(spacing)).contains(&usable)
        && (usable - tick).abs() <= spacing.value()
}

#[quickcheck]
fn inverted_price_is_reciprocal(raw: i32) -> bool {
    let tick = in_tick_range(raw) / 2;
    let decimals = TokenDecimals::new(8, 18);
    let product = tick_to_price(tick, decimals, false) * tick_to_price(tick, decimals, true);
    (product - 1.0).abs() < 1e-9
}

#[test]
fn usable_extremes_per_spacing() {
    let sixty = TickSpacing::new(60).unwrap();
    assert_eq!(min_usable_tick(sixty), -887_220);
    assert_eq!(max_usable_tick(sixty), 887_220);
    assert_eq!(min_usable_tick(TickSpacing::ONE), MIN_TICK);
    assert_eq!(max_usable_tick(TickSpacing::ONE), MAX_TICK);

    assert_eq!(limit_of(-887_220, sixty), Some(Limit::Min));
    assert_eq!(limit_of(887_220, sixty), Some(Limit::Max));
    assert_eq!(limit_of(0, sixty), None);
}

#[test]
fn non_positive_prices_do_not_resolve() {
    let decimals = TokenDecimals::new(18, 18);
    assert!(price_to_closest_tick(0.0, decimals, false).is_err());
    assert!(price_to_closest_tick(-1.0, decimals, false).is_err());
    assert!(price_to_closest_tick(f64::NAN, decimals, false).is_err());
    assert!(price_to_closest_tick(f64::INFINITY, decimals, true).is_err());
}

#[test]
fn out_of_range_prices_clamp_to_tick_bounds() {
    let decimals = TokenDecimals::new(18, 18);
    assert_eq!(price_to_closest_tick(1e300, decimals, false), Ok(MAX_TICK));
    assert_eq!(price_to_closest_tick(1e-300, decimals, false), Ok(MIN_TICK));
}
