pub mod chart;
pub mod errors;
pub mod liquidity;
pub mod logging;
pub mod pool;
pub mod range;
