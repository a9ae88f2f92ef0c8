use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};

/// Zoom behaviour of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Initial visible window as multiples of the current price.
    pub initial_min: f64,
    pub initial_max: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale above which the reset control is offered.
    pub reset_scale_upper: f64,
    /// Scale below which the reset control is offered.
    pub reset_scale_lower: f64,
    /// Quiet period after the last zoom/pan before the view counts as settled.
    pub settle_ms: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial_min: 0.5,
            initial_max: 2.0,
            min_scale: 0.5 * 2f64.powi(-4),
            max_scale: 0.5 * 32.0,
            reset_scale_upper: 0.5 * 16.0,
            reset_scale_lower: 0.5 * 2f64.powi(-3),
            settle_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub min_ticks: usize,
    pub max_ticks: usize,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self { min_ticks: 2, max_ticks: 11 }
    }
}

/// Chart configuration, loadable from JSON with every field optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub zoom: ZoomConfig,
    pub axis: AxisConfig,
    /// Brush values at or above this are treated as unbounded.
    pub full_range_sentinel: f64,
    /// Extra fraction of the visible window the curve walk covers on each side.
    pub window_margin: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            axis: AxisConfig::default(),
            full_range_sentinel: 1e35,
            window_margin: 0.25,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let zoom = &self.zoom;
        if !(zoom.initial_min > 0.0 && zoom.initial_min < zoom.initial_max) {
            return Err(AppError::Config(format!(
                "initial zoom window {}..{} must be positive and ascending",
                zoom.initial_min, zoom.initial_max
            )));
        }
        if !(zoom.min_scale > 0.0 && zoom.min_scale <= 1.0 && zoom.max_scale >= 1.0) {
            return Err(AppError::Config(format!(
                "scale extent {}..{} must contain 1",
                zoom.min_scale, zoom.max_scale
            )));
        }
        if zoom.reset_scale_lower >= zoom.reset_scale_upper {
            return Err(AppError::Config("reset scale bounds are inverted".to_string()));
        }
        if self.axis.min_ticks < 2 || self.axis.max_ticks < self.axis.min_ticks {
            return Err(AppError::Config(format!(
                "axis tick bounds {}..{} are invalid",
                self.axis.min_ticks, self.axis.max_ticks
            )));
        }
        if !(self.full_range_sentinel > 0.0) || !(self.window_margin >= 0.0) {
            return Err(AppError::Config("sentinel and window margin must be positive".to_string()));
        }
        Ok(())
    }
}
