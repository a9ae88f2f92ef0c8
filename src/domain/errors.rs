use derive_more::Display;

/// Malformed pool data. Charts degrade to an empty state instead of failing the page.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DataError {
    #[display(fmt = "pool has no initialized ticks")]
    EmptyTicks,
    #[display(fmt = "no initialized tick at or below active tick {}", active_tick)]
    PivotNotFound { active_tick: i32 },
    #[display(fmt = "tick {} does not follow tick {}", current, previous)]
    NonMonotonicTicks { previous: i32, current: i32 },
    #[display(fmt = "tick spacing must be positive, got {}", _0)]
    InvalidTickSpacing(i32),
    #[display(fmt = "invalid liquidity value: {}", _0)]
    InvalidLiquidity(String),
}

impl std::error::Error for DataError {}

/// Outcomes of a range edit that leave the committed range untouched.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum RangeError {
    #[display(fmt = "cannot resolve a tick for {}", _0)]
    ConversionUnresolved(String),
    #[display(fmt = "lower tick {} is not below upper tick {}", lower, upper)]
    InvalidRangeDiscarded { lower: i32, upper: i32 },
    #[display(fmt = "bound is pinned at its limit")]
    BoundAtLimit,
    #[display(fmt = "no drag in progress")]
    NoActiveDrag,
}

impl std::error::Error for RangeError {}

/// Root error for the crate boundary (JSON input, configuration).
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Data Error: {}", _0)]
    Data(DataError),
    #[display(fmt = "Range Error: {}", _0)]
    Range(RangeError),
    #[display(fmt = "Config Error: {}", _0)]
    Config(String),
    #[display(fmt = "Parse Error: {}", _0)]
    Parse(String),
}

impl std::error::Error for AppError {}

impl From<DataError> for AppError {
    fn from(error: DataError) -> Self {
        AppError::Data(error)
    }
}

impl From<RangeError> for AppError {
    fn from(error: RangeError) -> Self {
        AppError::Range(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Parse(error.to_string())
    }
}

pub type DataResult<T> = Result<T, DataError>;
pub type RangeResult<T> = Result<T, RangeError>;
