use super::curve::{LiquidityCurve, ProcessedPoint};
use crate::domain::range::{DisplayBound, PriceContext, PriceRange};
use serde::Serialize;

/// Renderable `(price, liquidity)` pair, ordered by displayed price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub price: f64,
    pub active_liquidity: f64,
}

impl From<&ProcessedPoint> for SeriesPoint {
    fn from(point: &ProcessedPoint) -> Self {
        Self { price: point.price, active_liquidity: point.liquidity_active as f64 }
    }
}

/// Closed interval in displayed price space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceInterval {
    pub min: f64,
    pub max: f64,
}

impl PriceInterval {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedCurve {
    pub below_current: Vec<SeriesPoint>,
    pub above_current: Vec<SeriesPoint>,
}

pub struct CurvePartitioner;

impl CurvePartitioner {
    /// Splits the curve at `current_price`. Both halves share a boundary sample at the
    /// split price carrying the liquidity of the segment around it.
    pub fn partition(curve: &LiquidityCurve, current_price: f64) -> PartitionedCurve {
        let series = Self::by_price(curve);
        if series.is_empty() || !current_price.is_finite() {
            return PartitionedCurve::default();
        }

        let mut below: Vec<SeriesPoint> = Vec::new();
        let mut above: Vec<SeriesPoint> = Vec::new();
        let mut exact: Option<SeriesPoint> = None;

        for point in series.iter().copied() {
            if same_price(point.price, current_price) {
                exact = Some(point);
            } else if point.price < current_price {
                below.push(point);
            } else {
                above.push(point);
            }
        }

        let boundary = exact.unwrap_or_else(|| SeriesPoint {
            price: current_price,
            active_liquidity: curve.liquidity_at(current_price).unwrap_or(0) as f64,
        });
        below.push(boundary);
        above.insert(0, boundary);

        PartitionedCurve { below_current: below, above_current: above }
    }

    /// Displayed-price interval covered by a complete range, `None` otherwise.
    pub fn mask(range: &PriceRange, context: &PriceContext) -> Option<PriceInterval> {
        if !range.is_complete() {
            return None;
        }
        let min = range.display_price(DisplayBound::Min, context)?;
        let max = range.display_price(DisplayBound::Max, context)?;
        Some(PriceInterval { min: min.min(max), max: max.max(min) })
    }

    /// Portion of the curve inside `interval`, closed with samples at both edges.
    pub fn masked(curve: &LiquidityCurve, interval: PriceInterval) -> Vec<SeriesPoint> {
        let series = Self::by_price(curve);
        if series.is_empty() {
            return Vec::new();
        }

        let mut masked: Vec<SeriesPoint> = series.iter().copied().filter(|p| interval.contains(p.price)).collect();

        for edge in [interval.min, interval.max] {
            if !edge.is_finite() || masked.iter().any(|p| same_price(p.price, edge)) {
                continue;
            }
            if let Some(liquidity) = curve.liquidity_at(edge) {
                masked.push(SeriesPoint { price: edge, active_liquidity: liquidity as f64 });
            }
        }

        masked.sort_by(|a, b| a.price.total_cmp(&b.price));
        masked
    }

    fn by_price(curve: &LiquidityCurve) -> Vec<SeriesPoint> {
        let mut series: Vec<SeriesPoint> = curve.points().iter().map(SeriesPoint::from).collect();
        series.sort_by(|a, b| a.price.total_cmp(&b.price));
        series
    }
}

fn same_price(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}
