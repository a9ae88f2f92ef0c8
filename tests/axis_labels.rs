use insta::assert_json_snapshot;
use liquidity_range_wasm::domain::chart::{AxisLabelPlanner, AxisTick, LabelDensity};
use liquidity_range_wasm::domain::pool::{TickSpacing, TokenDecimals};
use liquidity_range_wasm::domain::range::PriceContext;
use quickcheck_macros::quickcheck;

fn context(spacing: i32, invert: bool) -> PriceContext {
    PriceContext { spacing: TickSpacing::new(spacing).unwrap(), decimals: TokenDecimals::new(18, 18), invert }
}

fn ticks_at(positions: &[f64]) -> Vec<AxisTick> {
    positions
        .iter()
        .map(|&position| AxisTick { tick: None, price: position, position, show_label: true, label: String::new() })
        .collect()
}

fn sorted_positions(raw: Vec<u16>) -> Vec<f64> {
    let mut positions: Vec<f64> = raw.into_iter().map(|v| (v % 1001) as f64 / 10.0).collect();
    positions.sort_by(f64::total_cmp);
    positions
}

#[test]
fn density_follows_orders_of_magnitude() {
    assert_eq!(LabelDensity::for_window(1.0, 10.0), LabelDensity { tick_count: 9, min_gap_percent: 14.0 });
    assert_eq!(LabelDensity::for_window(1.0, 1e10), LabelDensity { tick_count: 2, min_gap_percent: 40.0 });
    assert_eq!(LabelDensity::for_window(1.0, 2.0).tick_count, 11);
    assert_eq!(LabelDensity::for_window(0.0, 2.0), LabelDensity::FALLBACK);
    assert_eq!(LabelDensity::for_window(1.0, f64::INFINITY), LabelDensity::FALLBACK);
}

#[test]
fn label_visibility_snapshot() {
    let mut ticks = ticks_at(&[0.0, 5.0, 12.0, 20.0, 33.0, 40.0, 41.0, 60.0, 100.0]);
    AxisLabelPlanner::filter_overlapping(&mut ticks, 14.0);
    let shown: Vec<bool> = ticks.iter().map(|t| t.show_label).collect();
    assert_json_snapshot!(shown, @r###"
    [
      true,
      false,
      false,
      true,
      false,
      true,
      false,
      true,
      true
    ]
    "###);
}

#[quickcheck]
fn overlap_filter_is_idempotent(raw: Vec<u16>, gap: u8) -> bool {
    let gap = (gap % 50) as f64;
    let mut once = ticks_at(&sorted_positions(raw));
    AxisLabelPlanner::filter_overlapping(&mut once, gap);
    let mut twice = once.clone();
    AxisLabelPlanner::filter_overlapping(&mut twice, gap);
    once == twice
}

#[quickcheck]
fn shown_labels_respect_the_gap(raw: Vec<u16>, gap: u8) -> bool {
    let gap = (gap % 50) as f64;
    let mut ticks = ticks_at(&sorted_positions(raw));
    AxisLabelPlanner::filter_overlapping(&mut ticks, gap);
    let shown: Vec<f64> = ticks.iter().filter(|t| t.show_label).map(|t| t.position).collect();
    let first_kept = ticks.first().is_none_or(|t| t.show_label);
    first_kept && shown.windows(2).all(|w| w[1] - w[0] >= gap)
}

#[test]
fn plan_spans_one_order_of_magnitude() {
    let planner = AxisLabelPlanner::default();
    let ticks = planner.plan(1.0, 10.0, &context(1, false));

    assert_eq!(ticks.len(), 9);
    assert_eq!(ticks[0].tick, Some(0));
    assert_eq!(ticks[0].label, "1");
    assert!(ticks[0].show_label);
    assert!(ticks.windows(2).all(|w| w[0].position < w[1].position));
    let shown: Vec<f64> = ticks.iter().filter(|t| t.show_label).map(|t| t.position).collect();
    assert!(shown.windows(2).all(|w| w[1] - w[0] >= 14.0));
}

#[test]
fn ticks_snap_to_spacing() {
    let planner = AxisLabelPlanner::default();
    let ticks = planner.plan(0.8, 1.25, &context(60, false));
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|t| t.tick.is_some_and(|tick| tick % 60 == 0)));
}

#[test]
fn inverted_plan_reads_left_to_right() {
    let planner = AxisLabelPlanner::default();
    let ticks = planner.plan(0.5, 2.0, &context(10, true));

    assert!(ticks.len() >= 2);
    assert!(ticks.windows(2).all(|w| w[0].price < w[1].price && w[0].position <= w[1].position));
    let indices: Vec<i32> = ticks.iter().filter_map(|t| t.tick).collect();
    assert!(indices.windows(2).all(|w| w[0] > w[1]));
}
