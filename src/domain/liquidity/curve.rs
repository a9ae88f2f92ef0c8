use super::price_math::tick_to_price;
use crate::domain::errors::{DataError, DataResult};
use crate::domain::logging::LogComponent;
use crate::domain::pool::{PoolSnapshot, TickInfo};
use crate::{log_debug, log_warn};
use serde::Serialize;

/// One sample of the dense active-liquidity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPoint {
    pub tick: i32,
    pub liquidity_active: u128,
    /// Delta stored at this tick, 0 for the synthetic active point.
    pub liquidity_net: i128,
    pub price: f64,
}

/// Dense curve ordered by ascending tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiquidityCurve {
    points: Vec<ProcessedPoint>,
    active_index: Option<usize>,
    inverted: bool,
}

impl LiquidityCurve {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[ProcessedPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn active_point(&self) -> Option<&ProcessedPoint> {
        self.active_index.and_then(|i| self.points.get(i))
    }

    /// Largest active liquidity on the curve, used for the y-domain.
    pub fn max_liquidity(&self) -> u128 {
        self.points.iter().map(|p| p.liquidity_active).max().unwrap_or(0)
    }

    /// Liquidity of the step segment that contains the displayed `price`.
    ///
    /// Each sample holds the liquidity from its tick up to the next one. A price below the
    /// first sample's tick gets that sample's liquidity with its net removed.
    pub fn liquidity_at(&self, price: f64) -> Option<u128> {
        let first = self.points.first()?;
        let reached = |point: &&ProcessedPoint| {
            if self.inverted { point.price >= price } else { point.price <= price }
        };
        Some(match self.points.iter().rev().find(reached) {
            Some(point) => point.liquidity_active,
            None => remove_net(first.liquidity_active, first.liquidity_net),
        })
    }
}

/// Displayed-price window a walk may stop outside of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceWindow {
    pub min: f64,
    pub max: f64,
    /// Fraction of the window added on both sides before a walk stops.
    pub margin: f64,
}

impl PriceWindow {
    pub fn new(min: f64, max: f64, margin: f64) -> Self {
        Self { min: min.min(max), max: min.max(max), margin: margin.max(0.0) }
    }

    fn expanded_bounds(&self) -> (f64, f64) {
        (self.min / (1.0 + self.margin), self.max * (1.0 + self.margin))
    }

    /// True once `price` has left the window on the side a walk is heading towards.
    fn passed(&self, price: f64, rising: bool) -> bool {
        let (low, high) = self.expanded_bounds();
        if rising { price > high } else { price < low }
    }
}

/// Builds the active-liquidity curve by walking outwards from the active tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityCurveBuilder {
    invert: bool,
    window: Option<PriceWindow>,
}

impl LiquidityCurveBuilder {
    pub fn new(invert: bool) -> Self {
        Self { invert, window: None }
    }

    pub fn with_window(mut self, window: PriceWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn build(&self, snapshot: &PoolSnapshot) -> DataResult<LiquidityCurve> {
        let ticks = snapshot.ticks();
        if ticks.is_empty() {
            return Err(DataError::EmptyTicks);
        }

        let active_tick = snapshot.active_tick();
        let pivot = find_pivot(ticks, active_tick)?;
        let pivot_is_active = ticks[pivot].index == active_tick;

        let active = ProcessedPoint {
            tick: active_tick,
            liquidity_active: snapshot.liquidity,
            liquidity_net: if pivot_is_active { ticks[pivot].liquidity_net } else { 0 },
            price: self.price(snapshot, active_tick),
        };

        let ascending = self.walk_ascending(snapshot, active, pivot + 1);
        // When the pivot sits below the active tick it has not been represented yet.
        let descending_start = if pivot_is_active { pivot.checked_sub(1) } else { Some(pivot) };
        let mut descending = match descending_start {
            Some(start) => self.walk_descending(snapshot, active, start),
            None => Vec::new(),
        };
        descending.reverse();

        let active_index = descending.len();
        let mut points = descending;
        points.reserve(ascending.len() + 1);
        points.push(active);
        points.extend(ascending);

        log_debug!(
            LogComponent::Domain("LiquidityCurve"),
            "built {} points around active tick {} (pivot {})",
            points.len(),
            active_tick,
            pivot
        );

        Ok(LiquidityCurve { points, active_index: Some(active_index), inverted: self.invert })
    }

    fn price(&self, snapshot: &PoolSnapshot, tick: i32) -> f64 {
        tick_to_price(tick, snapshot.decimals, self.invert)
    }

    /// Crossing a tick upward activates its delta immediately.
    fn walk_ascending(&self, snapshot: &PoolSnapshot, active: ProcessedPoint, start: usize) -> Vec<ProcessedPoint> {
        let ticks = snapshot.ticks();
        let mut processed = Vec::with_capacity(ticks.len().saturating_sub(start));
        let mut previous = active;

        for info in ticks.iter().skip(start) {
            let current = ProcessedPoint {
                tick: info.index,
                liquidity_active: apply_net(previous.liquidity_active, info.liquidity_net),
                liquidity_net: info.liquidity_net,
                price: self.price(snapshot, info.index),
            };
            processed.push(current);
            previous = current;

            if self.window.is_some_and(|w| w.passed(current.price, !self.invert)) {
                break;
            }
        }

        processed
    }

    /// Moving down, a tick's delta is removed only once the walk has stepped past it,
    /// so each point subtracts the net of the point processed before it.
    fn walk_descending(&self, snapshot: &PoolSnapshot, active: ProcessedPoint, start: usize) -> Vec<ProcessedPoint> {
        let ticks = snapshot.ticks();
        let mut processed = Vec::with_capacity(start + 1);
        let mut previous = active;

        for info in ticks[..=start].iter().rev() {
            let current = ProcessedPoint {
                tick: info.index,
                liquidity_active: remove_net(previous.liquidity_active, previous.liquidity_net),
                liquidity_net: info.liquidity_net,
                price: self.price(snapshot, info.index),
            };
            processed.push(current);
            previous = current;

            if self.window.is_some_and(|w| w.passed(current.price, self.invert)) {
                break;
            }
        }

        processed
    }
}

/// Index of the last initialized tick at or below `active_tick`.
fn find_pivot(ticks: &[TickInfo], active_tick: i32) -> DataResult<usize> {
    let above = ticks.partition_point(|t| t.index <= active_tick);
    above.checked_sub(1).ok_or(DataError::PivotNotFound { active_tick })
}

fn apply_net(liquidity: u128, net: i128) -> u128 {
    let next = if net >= 0 {
        liquidity.checked_add(net.unsigned_abs())
    } else {
        liquidity.checked_sub(net.unsigned_abs())
    };
    next.unwrap_or_else(|| {
        log_warn!(
            LogComponent::Domain("LiquidityCurve"),
            "liquidity {} with net {} left the u128 range, clamping",
            liquidity,
            net
        );
        if net >= 0 { u128::MAX } else { 0 }
    })
}

fn remove_net(liquidity: u128, net: i128) -> u128 {
    match net.checked_neg() {
        Some(negated) => apply_net(liquidity, negated),
        None => liquidity.saturating_add(net.unsigned_abs()),
    }
}
