//! Tick math and the active-liquidity curve.

pub mod curve;
pub mod partition;
pub mod price_math;

pub use curve::{LiquidityCurve, LiquidityCurveBuilder, PriceWindow, ProcessedPoint};
pub use partition::{CurvePartitioner, PartitionedCurve, PriceInterval, SeriesPoint};
pub use price_math::{
    Limit, MAX_TICK, MIN_TICK, TICK_BASE, limit_of, max_usable_tick, min_usable_tick, nearest_usable_tick,
    price_to_closest_tick, tick_to_price,
};
