use liquidity_range_wasm::domain::liquidity::{
    CurvePartitioner, LiquidityCurve, LiquidityCurveBuilder, PriceInterval, SeriesPoint, tick_to_price,
};
use liquidity_range_wasm::domain::pool::{PoolKind, PoolSnapshot, TickInfo, TickSpacing, TokenDecimals};
use liquidity_range_wasm::domain::range::{PriceContext, PriceRange};

fn decimals() -> TokenDecimals {
    TokenDecimals::new(18, 18)
}

fn curve(invert: bool) -> LiquidityCurve {
    curve_at(0, invert)
}

fn curve_at(current_tick: i32, invert: bool) -> LiquidityCurve {
    let snapshot = PoolSnapshot::new(
        "0xpool",
        PoolKind::V3,
        current_tick,
        TickSpacing::new(60).unwrap(),
        150,
        decimals(),
        vec![TickInfo::new(-60, 100), TickInfo::new(0, 50), TickInfo::new(60, -150)],
    )
    .unwrap();
    LiquidityCurveBuilder::new(invert).build(&snapshot).unwrap()
}

fn context(invert: bool) -> PriceContext {
    PriceContext { spacing: TickSpacing::new(60).unwrap(), decimals: decimals(), invert }
}

fn liquidity(points: &[SeriesPoint]) -> Vec<f64> {
    points.iter().map(|p| p.active_liquidity).collect()
}

#[test]
fn halves_share_the_current_price_sample() {
    let parts = CurvePartitioner::partition(&curve(false), 1.0);

    assert_eq!(liquidity(&parts.below_current), vec![100.0, 150.0]);
    assert_eq!(liquidity(&parts.above_current), vec![150.0, 0.0]);
    assert_eq!(parts.below_current.last(), parts.above_current.first());
    assert_eq!(parts.below_current.last().map(|p| p.price), Some(1.0));
}

#[test]
fn split_between_samples_uses_segment_liquidity() {
    let current = tick_to_price(10, decimals(), false);
    let parts = CurvePartitioner::partition(&curve(false), current);

    assert_eq!(parts.below_current.len(), 3);
    assert_eq!(parts.above_current.len(), 2);
    let boundary = parts.above_current[0];
    assert_eq!(boundary.price, current);
    assert_eq!(boundary.active_liquidity, 150.0);
    assert!(parts.below_current.windows(2).all(|w| w[0].price < w[1].price));
}

#[test]
fn split_near_the_next_tick_keeps_the_active_segment() {
    let current = tick_to_price(50, decimals(), false);
    let parts = CurvePartitioner::partition(&curve_at(50, false), current);

    assert_eq!(liquidity(&parts.below_current), vec![100.0, 150.0, 150.0]);
    assert_eq!(liquidity(&parts.above_current), vec![150.0, 0.0]);
    assert_eq!(parts.above_current[0].price, current);
}

#[test]
fn inverted_split_near_the_next_tick_keeps_the_active_segment() {
    let current = tick_to_price(50, decimals(), true);
    let parts = CurvePartitioner::partition(&curve_at(50, true), current);

    assert_eq!(liquidity(&parts.below_current), vec![0.0, 150.0]);
    assert_eq!(liquidity(&parts.above_current), vec![150.0, 150.0, 100.0]);
    assert_eq!(parts.below_current.last().map(|p| p.price), Some(current));
}

#[test]
fn inverted_curve_puts_higher_ticks_below() {
    let parts = CurvePartitioner::partition(&curve(true), 1.0);
    assert_eq!(liquidity(&parts.below_current), vec![0.0, 150.0]);
    assert_eq!(liquidity(&parts.above_current), vec![150.0, 100.0]);
}

#[test]
fn empty_curve_has_no_halves() {
    let parts = CurvePartitioner::partition(&LiquidityCurve::empty(), 1.0);
    assert!(parts.below_current.is_empty());
    assert!(parts.above_current.is_empty());
}

#[test]
fn mask_needs_both_bounds() {
    let range = PriceRange { lower_tick: Some(-60), upper_tick: None };
    assert_eq!(CurvePartitioner::mask(&range, &context(false)), None);
}

#[test]
fn mask_closes_the_range_with_edge_samples() {
    let range = PriceRange::new(-120, 120);
    let interval = CurvePartitioner::mask(&range, &context(false)).unwrap();
    assert_eq!(
        interval,
        PriceInterval { min: tick_to_price(-120, decimals(), false), max: tick_to_price(120, decimals(), false) }
    );

    let masked = CurvePartitioner::masked(&curve(false), interval);
    assert_eq!(liquidity(&masked), vec![0.0, 100.0, 150.0, 0.0, 0.0]);
    assert_eq!(masked.first().map(|p| p.price), Some(interval.min));
    assert_eq!(masked.last().map(|p| p.price), Some(interval.max));
}

#[test]
fn inverted_mask_is_ascending_in_displayed_prices() {
    let range = PriceRange::new(0, 60);
    let interval = CurvePartitioner::mask(&range, &context(true)).unwrap();
    assert!(interval.min < interval.max);
    assert_eq!(interval.max, tick_to_price(0, decimals(), true));

    let masked = CurvePartitioner::masked(&curve(true), interval);
    assert_eq!(liquidity(&masked), vec![0.0, 150.0]);
}
