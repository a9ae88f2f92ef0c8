use crate::domain::errors::{DataError, DataResult};
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Distance between usable ticks for a pool fee tier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TickSpacing(i32);

impl TickSpacing {
    pub const ONE: TickSpacing = TickSpacing(1);

    pub fn new(spacing: i32) -> DataResult<Self> {
        if spacing <= 0 {
            return Err(DataError::InvalidTickSpacing(spacing));
        }
        Ok(Self(spacing))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for TickSpacing {
    type Error = DataError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Token decimals of a pair; the displayed price is token1 per token0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDecimals {
    pub token0: u8,
    pub token1: u8,
}

impl TokenDecimals {
    pub fn new(token0: u8, token1: u8) -> Self {
        Self { token0, token1 }
    }

    /// `10^(decimals0 - decimals1)`
    pub fn scale(&self) -> f64 {
        10f64.powi(self.token0 as i32 - self.token1 as i32)
    }
}

/// Pool family the snapshot was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum PoolKind {
    #[display(fmt = "Uniswap V2")]
    #[strum(serialize = "v2")]
    #[serde(rename = "v2")]
    V2,
    #[display(fmt = "Uniswap V3")]
    #[strum(serialize = "v3")]
    #[serde(rename = "v3")]
    V3,
    #[display(fmt = "Uniswap V4")]
    #[strum(serialize = "v4")]
    #[serde(rename = "v4")]
    V4,
}

/// Identifies a zoom configuration; a change resets the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoomKey {
    pub pool_id: String,
    pub tick_spacing: TickSpacing,
}
