//! Axis planning and label text for the liquidity chart.

pub mod axis;
pub mod price_format;

pub use axis::{AxisLabelPlanner, AxisTick, LabelDensity};
pub use price_format::format_price_label;
