use crate::domain::{
    errors::{AppError, DataError, DataResult},
    liquidity::{MAX_TICK, MIN_TICK, TICK_BASE},
    logging::LogComponent,
    pool::{PoolKind, PoolSnapshot, TickInfo, TickSpacing, TokenDecimals},
};
use crate::log_debug;
use serde::{Deserialize, Serialize};

/// Pool data as delivered by the indexer, one shape per pool family.
/// Liquidity amounts are decimal strings since they exceed the JS number range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PoolSnapshotDto {
    V2(PairDto),
    V3(ConcentratedPoolDto),
    V4(ConcentratedPoolDto),
}

/// Constant-product pair. Its liquidity spans the whole price axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDto {
    pub id: String,
    pub reserve0: String,
    pub reserve1: String,
    pub token0_decimals: u8,
    pub token1_decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentratedPoolDto {
    pub id: String,
    pub current_tick: i32,
    pub tick_spacing: i32,
    pub liquidity: String,
    pub token0_decimals: u8,
    pub token1_decimals: u8,
    pub ticks: Vec<TickDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickDto {
    pub tick_idx: i32,
    pub liquidity_net: String,
}

impl PoolSnapshotDto {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> PoolKind {
        match self {
            PoolSnapshotDto::V2(_) => PoolKind::V2,
            PoolSnapshotDto::V3(_) => PoolKind::V3,
            PoolSnapshotDto::V4(_) => PoolKind::V4,
        }
    }
}

/// Parses and validates a JSON pool snapshot in one step.
pub fn parse_pool_snapshot(json: &str) -> Result<PoolSnapshot, AppError> {
    let dto = PoolSnapshotDto::from_json(json)?;
    Ok(PoolSnapshot::try_from(dto)?)
}

impl TryFrom<PoolSnapshotDto> for PoolSnapshot {
    type Error = DataError;

    fn try_from(dto: PoolSnapshotDto) -> DataResult<Self> {
        let kind = dto.kind();
        match dto {
            PoolSnapshotDto::V2(pair) => pair_to_snapshot(pair),
            PoolSnapshotDto::V3(pool) | PoolSnapshotDto::V4(pool) => concentrated_to_snapshot(pool, kind),
        }
    }
}

fn concentrated_to_snapshot(dto: ConcentratedPoolDto, kind: PoolKind) -> DataResult<PoolSnapshot> {
    let ticks = dto
        .ticks
        .iter()
        .map(|tick| Ok(TickInfo::new(tick.tick_idx, parse_net(&tick.liquidity_net)?)))
        .collect::<DataResult<Vec<_>>>()?;

    PoolSnapshot::new(
        dto.id,
        kind,
        dto.current_tick,
        TickSpacing::new(dto.tick_spacing)?,
        parse_liquidity(&dto.liquidity)?,
        TokenDecimals::new(dto.token0_decimals, dto.token1_decimals),
        ticks,
    )
}

/// A pair behaves like one position from the lowest to the highest tick with
/// liquidity `sqrt(reserve0 · reserve1)`, priced at `reserve1 / reserve0`.
fn pair_to_snapshot(dto: PairDto) -> DataResult<PoolSnapshot> {
    let reserve0 = parse_liquidity(&dto.reserve0)?;
    let reserve1 = parse_liquidity(&dto.reserve1)?;
    if reserve0 == 0 || reserve1 == 0 {
        return Err(DataError::InvalidLiquidity(format!("empty reserves {}/{}", dto.reserve0, dto.reserve1)));
    }

    let (r0, r1) = (reserve0 as f64, reserve1 as f64);
    let liquidity = (r0.sqrt() * r1.sqrt()).floor() as u128;
    let current_tick = ((r1 / r0).ln() / TICK_BASE.ln()).floor().clamp(MIN_TICK as f64, MAX_TICK as f64) as i32;
    let net = i128::try_from(liquidity).map_err(|_| DataError::InvalidLiquidity(liquidity.to_string()))?;

    log_debug!(LogComponent::Infrastructure("PoolDto"), "pair {} mapped to tick {}", dto.id, current_tick);

    PoolSnapshot::new(
        dto.id,
        PoolKind::V2,
        current_tick,
        TickSpacing::ONE,
        liquidity,
        TokenDecimals::new(dto.token0_decimals, dto.token1_decimals),
        vec![TickInfo::new(MIN_TICK, net), TickInfo::new(MAX_TICK, -net)],
    )
}

fn parse_liquidity(text: &str) -> DataResult<u128> {
    text.trim().parse::<u128>().map_err(|_| DataError::InvalidLiquidity(text.to_string()))
}

fn parse_net(text: &str) -> DataResult<i128> {
    text.trim().parse::<i128>().map_err(|_| DataError::InvalidLiquidity(text.to_string()))
}
