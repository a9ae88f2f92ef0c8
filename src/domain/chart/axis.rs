use super::price_format::format_price_label;
use crate::domain::liquidity::price_math::{nearest_usable_tick, price_to_closest_tick, tick_to_price};
use crate::domain::range::PriceContext;
use serde::Serialize;

/// How many ticks to place and how far apart shown labels must be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDensity {
    pub tick_count: usize,
    pub min_gap_percent: f64,
}

impl LabelDensity {
    pub const FALLBACK: LabelDensity = LabelDensity { tick_count: 7, min_gap_percent: 15.0 };

    /// Step table over `log10(max / min)`: a narrow window gets more, tighter labels.
    pub fn for_window(min: f64, max: f64) -> Self {
        if !(min > 0.0 && max > 0.0) || !min.is_finite() || !max.is_finite() {
            return Self::FALLBACK;
        }

        let orders_of_magnitude = (max / min).log10().abs();
        let (tick_count, min_gap_percent) = match orders_of_magnitude {
            o if o <= 0.5 => (11, 12.0),
            o if o <= 1.0 => (9, 14.0),
            o if o <= 2.0 => (7, 16.0),
            o if o <= 4.0 => (5, 20.0),
            o if o <= 8.0 => (3, 30.0),
            _ => (2, 40.0),
        };
        Self { tick_count, min_gap_percent }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    /// Usable tick the mark sits on; `None` when the window could not be mapped to ticks.
    pub tick: Option<i32>,
    pub price: f64,
    /// Percent along the displayed axis, 0 at the left edge.
    pub position: f64,
    pub show_label: bool,
    pub label: String,
}

#[derive(Debug, Clone, Copy)]
pub struct AxisLabelPlanner {
    min_ticks: usize,
    max_ticks: usize,
}

impl Default for AxisLabelPlanner {
    fn default() -> Self {
        Self::new(2, 11)
    }
}

impl AxisLabelPlanner {
    pub fn new(min_ticks: usize, max_ticks: usize) -> Self {
        let min_ticks = min_ticks.max(2);
        Self { min_ticks, max_ticks: max_ticks.max(min_ticks) }
    }

    pub fn density(&self, min: f64, max: f64) -> LabelDensity {
        let density = LabelDensity::for_window(min, max);
        LabelDensity { tick_count: density.tick_count.clamp(self.min_ticks, self.max_ticks), ..density }
    }

    /// Tick marks for the visible window `[min, max]` of displayed prices, with labels
    /// that would overlap hidden.
    pub fn plan(&self, min: f64, max: f64, context: &PriceContext) -> Vec<AxisTick> {
        let density = self.density(min, max);
        let mut ticks = match tick_domain(min, max, context) {
            Some((low, high)) => Self::ticks_in_tick_domain(low, high, min, max, density.tick_count, context),
            None => Self::ticks_in_price_domain(min, max, density.tick_count),
        };
        Self::filter_overlapping(&mut ticks, density.min_gap_percent);
        ticks
    }

    /// Hides every label closer than `min_gap_percent` to the last shown one. The first
    /// shown label always stays; hidden labels are never revived, so a second pass is a no-op.
    pub fn filter_overlapping(ticks: &mut [AxisTick], min_gap_percent: f64) {
        let mut last_shown: Option<f64> = None;
        for tick in ticks.iter_mut().filter(|t| t.show_label) {
            match last_shown {
                Some(previous) if tick.position - previous < min_gap_percent => tick.show_label = false,
                _ => last_shown = Some(tick.position),
            }
        }
    }

    fn ticks_in_tick_domain(
        low: i32,
        high: i32,
        min: f64,
        max: f64,
        count: usize,
        context: &PriceContext,
    ) -> Vec<AxisTick> {
        let span = (high - low) as f64;
        let steps = (count - 1).max(1) as f64;

        let mut indices: Vec<i32> = (0..count)
            .map(|i| nearest_usable_tick((low as f64 + span * i as f64 / steps).round() as i32, context.spacing))
            .collect();
        indices.dedup();
        // Ascending ticks run right to left once prices are inverted.
        if context.invert {
            indices.reverse();
        }

        let width = max - min;
        indices
            .into_iter()
            .filter_map(|tick| {
                let price = tick_to_price(tick, context.decimals, context.invert);
                let position = (price - min) / width * 100.0;
                (-0.5..=100.5).contains(&position).then(|| AxisTick {
                    tick: Some(tick),
                    price,
                    position: position.clamp(0.0, 100.0),
                    show_label: true,
                    label: format_price_label(price),
                })
            })
            .collect()
    }

    fn ticks_in_price_domain(min: f64, max: f64, count: usize) -> Vec<AxisTick> {
        let low = min.max(0.0);
        if !max.is_finite() || max <= low {
            return Vec::new();
        }
        let steps = (count - 1).max(1) as f64;
        (0..count)
            .map(|i| {
                let ratio = i as f64 / steps;
                let price = low + (max - low) * ratio;
                AxisTick { tick: None, price, position: ratio * 100.0, show_label: true, label: format_price_label(price) }
            })
            .collect()
    }
}

/// Tick interval covering a displayed price window, ascending.
fn tick_domain(min: f64, max: f64, context: &PriceContext) -> Option<(i32, i32)> {
    if !(max > min) {
        return None;
    }
    let a = price_to_closest_tick(min, context.decimals, context.invert).ok()?;
    let b = price_to_closest_tick(max, context.decimals, context.invert).ok()?;
    Some((a.min(b), a.max(b)))
}
