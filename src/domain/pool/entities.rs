pub use super::value_objects::{PoolKind, TickSpacing, TokenDecimals, ZoomKey};
use crate::domain::errors::{DataError, DataResult};
use serde::{Deserialize, Serialize};

/// An initialized tick and the liquidity delta applied when price crosses it upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInfo {
    pub index: i32,
    pub liquidity_net: i128,
}

impl TickInfo {
    pub fn new(index: i32, liquidity_net: i128) -> Self {
        Self { index, liquidity_net }
    }
}

/// Immutable view of a pool at one point in time. Replaced whole on refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSnapshot {
    pub id: String,
    pub kind: PoolKind,
    pub current_tick: i32,
    pub tick_spacing: TickSpacing,
    pub liquidity: u128,
    pub decimals: TokenDecimals,
    ticks: Vec<TickInfo>,
}

impl PoolSnapshot {
    /// Builds a snapshot, rejecting tick lists that are not strictly ascending.
    pub fn new(
        id: impl Into<String>,
        kind: PoolKind,
        current_tick: i32,
        tick_spacing: TickSpacing,
        liquidity: u128,
        decimals: TokenDecimals,
        ticks: Vec<TickInfo>,
    ) -> DataResult<Self> {
        for pair in ticks.windows(2) {
            if pair[1].index <= pair[0].index {
                return Err(DataError::NonMonotonicTicks {
                    previous: pair[0].index,
                    current: pair[1].index,
                });
            }
        }

        Ok(Self {
            id: id.into(),
            kind,
            current_tick,
            tick_spacing,
            liquidity,
            decimals,
            ticks,
        })
    }

    pub fn ticks(&self) -> &[TickInfo] {
        &self.ticks
    }

    /// `floor(current_tick / spacing) * spacing`
    pub fn active_tick(&self) -> i32 {
        let spacing = self.tick_spacing.value();
        self.current_tick.div_euclid(spacing) * spacing
    }

    pub fn zoom_key(&self) -> ZoomKey {
        ZoomKey { pool_id: self.id.clone(), tick_spacing: self.tick_spacing }
    }

    /// Sum of all net deltas; zero for a well-formed pool.
    pub fn net_liquidity_sum(&self) -> i128 {
        self.ticks.iter().fold(0i128, |acc, t| acc.saturating_add(t.liquidity_net))
    }
}
