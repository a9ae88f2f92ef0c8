//! Tick <-> price conversion for 1.0001-based concentrated liquidity pools.
//!
//! Prices are human prices (token1 per token0) after decimal scaling. With `invert`
//! the price is quoted the other way round (token0 per token1), which reverses the
//! direction of every tick/price relation.

use crate::domain::errors::{RangeError, RangeResult};
use crate::domain::pool::{TickSpacing, TokenDecimals};

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;

/// Price ratio between two adjacent ticks.
pub const TICK_BASE: f64 = 1.0001;

/// Which global extreme a tick is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Raw price 0.
    Min,
    /// Raw price +∞.
    Max,
}

pub fn tick_to_price(tick: i32, decimals: TokenDecimals, invert: bool) -> f64 {
    let price = TICK_BASE.powf(tick as f64) * decimals.scale();
    if !invert {
        return price;
    }
    if price == 0.0 {
        f64::INFINITY
    } else {
        1.0 / price
    }
}

/// Closest integer tick for a displayed price, clamped to `[MIN_TICK, MAX_TICK]`.
pub fn price_to_closest_tick(price: f64, decimals: TokenDecimals, invert: bool) -> RangeResult<i32> {
    if !price.is_finite() || price <= 0.0 {
        return Err(RangeError::ConversionUnresolved(price.to_string()));
    }

    let quoted = if invert { 1.0 / price } else { price };
    let raw = quoted / decimals.scale();
    if !raw.is_finite() || raw <= 0.0 {
        return Err(RangeError::ConversionUnresolved(price.to_string()));
    }

    let tick = (raw.ln() / TICK_BASE.ln()).round();
    Ok(tick.clamp(MIN_TICK as f64, MAX_TICK as f64) as i32)
}

/// Rounds to the nearest multiple of `spacing` (halves toward +∞) and keeps the
/// result inside the global tick bounds.
pub fn nearest_usable_tick(tick: i32, spacing: TickSpacing) -> i32 {
    let spacing = spacing.value();
    let rounded = (tick as i64 + (spacing / 2) as i64).div_euclid(spacing as i64) * spacing as i64;
    if rounded < MIN_TICK as i64 {
        (rounded + spacing as i64) as i32
    } else if rounded > MAX_TICK as i64 {
        (rounded - spacing as i64) as i32
    } else {
        rounded as i32
    }
}

pub fn min_usable_tick(spacing: TickSpacing) -> i32 {
    let spacing = spacing.value();
    (MIN_TICK + spacing - 1).div_euclid(spacing) * spacing
}

pub fn max_usable_tick(spacing: TickSpacing) -> i32 {
    let spacing = spacing.value();
    MAX_TICK.div_euclid(spacing) * spacing
}

pub fn limit_of(tick: i32, spacing: TickSpacing) -> Option<Limit> {
    if tick <= min_usable_tick(spacing) {
        Some(Limit::Min)
    } else if tick >= max_usable_tick(spacing) {
        Some(Limit::Max)
    } else {
        None
    }
}

/// Usable tick for the raw-price extreme that a displayed price of zero maps to.
pub fn zero_price_tick(spacing: TickSpacing, invert: bool) -> i32 {
    if invert { max_usable_tick(spacing) } else { min_usable_tick(spacing) }
}

/// Usable tick for the raw-price extreme that an unbounded displayed price maps to.
pub fn unbounded_price_tick(spacing: TickSpacing, invert: bool) -> i32 {
    if invert { min_usable_tick(spacing) } else { max_usable_tick(spacing) }
}
