use liquidity_range_wasm::domain::errors::{AppError, DataError};
use liquidity_range_wasm::domain::pool::{PoolKind, PoolSnapshot, TickInfo};
use liquidity_range_wasm::infrastructure::{PoolSnapshotDto, parse_pool_snapshot};

const V3_POOL: &str = r#"{
    "kind": "v3",
    "id": "0x8ad5",
    "currentTick": 201000,
    "tickSpacing": 60,
    "liquidity": "340282366920938463463374607431768211455",
    "token0Decimals": 6,
    "token1Decimals": 18,
    "ticks": [
        { "tickIdx": 200940, "liquidityNet": "170141183460469231731687303715884105727" },
        { "tickIdx": 201060, "liquidityNet": "-170141183460469231731687303715884105727" }
    ]
}"#;

#[test]
fn concentrated_pool_keeps_full_precision() {
    let snapshot = parse_pool_snapshot(V3_POOL).unwrap();
    assert_eq!(snapshot.kind, PoolKind::V3);
    assert_eq!(snapshot.id, "0x8ad5");
    assert_eq!(snapshot.liquidity, u128::MAX);
    assert_eq!(snapshot.tick_spacing.value(), 60);
    assert_eq!(
        snapshot.ticks(),
        &[TickInfo::new(200_940, i128::MAX), TickInfo::new(201_060, -i128::MAX)]
    );
    assert_eq!(snapshot.active_tick(), 201_000);
}

#[test]
fn v4_shares_the_concentrated_shape() {
    let json = V3_POOL.replace("\"v3\"", "\"v4\"");
    let dto = PoolSnapshotDto::from_json(&json).unwrap();
    assert_eq!(dto.kind(), PoolKind::V4);
    let snapshot = PoolSnapshot::try_from(dto).unwrap();
    assert_eq!(snapshot.kind, PoolKind::V4);
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let json = V3_POOL.replace("\"v3\"", "\"v1\"");
    assert!(matches!(parse_pool_snapshot(&json), Err(AppError::Parse(_))));
}

#[test]
fn invalid_spacing_is_a_data_error() {
    let json = V3_POOL.replace("\"tickSpacing\": 60", "\"tickSpacing\": 0");
    assert_eq!(parse_pool_snapshot(&json), Err(AppError::Data(DataError::InvalidTickSpacing(0))));
}

#[test]
fn unordered_ticks_are_a_data_error() {
    let json = V3_POOL.replace("200940", "201120");
    assert_eq!(
        parse_pool_snapshot(&json),
        Err(AppError::Data(DataError::NonMonotonicTicks { previous: 201_120, current: 201_060 }))
    );
}

#[test]
fn empty_pair_is_rejected() {
    let json = r#"{"kind":"v2","id":"pair","reserve0":"0","reserve1":"10","token0Decimals":18,"token1Decimals":18}"#;
    assert!(matches!(parse_pool_snapshot(json), Err(AppError::Data(DataError::InvalidLiquidity(_)))));
}
