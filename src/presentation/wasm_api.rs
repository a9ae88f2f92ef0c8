use wasm_bindgen::prelude::*;

use crate::application::{ChartGesture, LiquidityChartService};
use crate::config::ChartConfig;
use crate::domain::{
    errors::{AppError, RangeError},
    logging::{LogComponent, get_time_provider},
    range::{BrushDomain, BrushMode, CommitOutcome, DisplayBound, PriceRange, StepDirection},
};
use crate::infrastructure::parse_pool_snapshot;
use crate::log_error;
use crate::view_state::ZoomTransform;
use std::str::FromStr;

/// JavaScript handle for one liquidity chart. Thin bridge over `LiquidityChartService`;
/// frames cross the boundary as JSON strings.
#[wasm_bindgen]
pub struct LiquidityChartApi {
    service: LiquidityChartService,
}

#[wasm_bindgen]
impl LiquidityChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { service: LiquidityChartService::new(ChartConfig::default()) }
    }

    /// Chart with a JSON configuration; missing fields keep their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<LiquidityChartApi, JsValue> {
        let config = ChartConfig::from_json(config_json).map_err(to_js)?;
        Ok(Self { service: LiquidityChartService::new(config) })
    }

    /// Replaces the pool snapshot. Returns the chart status as JSON.
    #[wasm_bindgen(js_name = setPoolSnapshot)]
    pub fn set_pool_snapshot(&mut self, snapshot_json: &str) -> Result<String, JsValue> {
        let snapshot = parse_pool_snapshot(snapshot_json).map_err(|error| {
            log_error!(LogComponent::Presentation("LiquidityChartApi"), "rejected snapshot: {}", error);
            to_js(error)
        })?;
        let status = self.service.replace_snapshot(snapshot);
        serde_json::to_string(status).map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(js_name = setRange)]
    pub fn set_range(&mut self, lower_tick: Option<i32>, upper_tick: Option<i32>) -> Result<bool, JsValue> {
        let outcome = self.service.set_range(PriceRange { lower_tick, upper_tick }).map_err(range_to_js)?;
        Ok(matches!(outcome, CommitOutcome::Committed(_)))
    }

    #[wasm_bindgen(js_name = setInvert)]
    pub fn set_invert(&mut self, invert: bool) {
        self.dispatch(ChartGesture::InvertToggle(invert)).ok();
    }

    /// Brush moved. `mode` is `drag`, `handle` or `reset`. Values at or above the
    /// configured sentinel count as unbounded.
    #[wasm_bindgen(js_name = brushMove)]
    pub fn brush_move(&mut self, min: f64, max: f64, mode: &str) -> Result<(), JsValue> {
        let mode = BrushMode::from_str(mode).map_err(|_| JsValue::from_str(&format!("unknown brush mode {}", mode)))?;
        let domain = BrushDomain::from_prices(min, max, self.service.config().full_range_sentinel);
        self.dispatch(ChartGesture::BrushMove { domain, mode }).map(|_| ())
    }

    #[wasm_bindgen(js_name = brushEnd)]
    pub fn brush_end(&mut self) -> Result<bool, JsValue> {
        self.dispatch(ChartGesture::BrushEnd)
    }

    #[wasm_bindgen(js_name = brushCancel)]
    pub fn brush_cancel(&mut self) {
        self.dispatch(ChartGesture::BrushCancel).ok();
    }

    /// Typed price for the left (`is_max == false`) or right edge.
    #[wasm_bindgen(js_name = commitText)]
    pub fn commit_text(&mut self, is_max: bool, text: String) -> Result<bool, JsValue> {
        self.dispatch(ChartGesture::TextCommit { bound: display_bound(is_max), text })
    }

    #[wasm_bindgen(js_name = pasteRange)]
    pub fn paste_range(&mut self, min: String, max: String) -> Result<bool, JsValue> {
        self.dispatch(ChartGesture::Paste { min, max })
    }

    #[wasm_bindgen(js_name = setFullRange)]
    pub fn set_full_range(&mut self) -> Result<bool, JsValue> {
        self.dispatch(ChartGesture::FullRange)
    }

    #[wasm_bindgen(js_name = stepBound)]
    pub fn step_bound(&mut self, is_max: bool, up: bool) -> Result<bool, JsValue> {
        let direction = if up { StepDirection::Up } else { StepDirection::Down };
        self.dispatch(ChartGesture::Step { bound: display_bound(is_max), direction })
    }

    /// Wheel zoom; `anchor` is the cursor position as a fraction of the chart width.
    #[wasm_bindgen(js_name = zoom)]
    pub fn zoom(&mut self, factor: f64, anchor: f64) {
        self.dispatch(ChartGesture::Zoom { factor, anchor }).ok();
    }

    #[wasm_bindgen(js_name = pan)]
    pub fn pan(&mut self, width_ratio: f64) {
        self.dispatch(ChartGesture::Pan { width_ratio }).ok();
    }

    #[wasm_bindgen(js_name = setZoomTransform)]
    pub fn set_zoom_transform(&mut self, scale: f64, translate: f64) {
        self.dispatch(ChartGesture::SetTransform(ZoomTransform { scale, translate })).ok();
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) {
        self.dispatch(ChartGesture::ResetZoom).ok();
    }

    /// Current chart frame as JSON.
    #[wasm_bindgen(js_name = frame)]
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let frame = self.service.frame(now_ms());
        serde_json::to_string(&frame).map_err(|e| to_js(e.into()))
    }
}

impl Default for LiquidityChartApi {
    fn default() -> Self {
        Self::new()
    }
}

impl LiquidityChartApi {
    fn dispatch(&mut self, gesture: ChartGesture) -> Result<bool, JsValue> {
        let outcome = self.service.dispatch(gesture, now_ms()).map_err(range_to_js)?;
        Ok(matches!(outcome, CommitOutcome::Committed(_)))
    }
}

fn display_bound(is_max: bool) -> DisplayBound {
    if is_max { DisplayBound::Max } else { DisplayBound::Min }
}

fn now_ms() -> u64 {
    get_time_provider().current_timestamp()
}

fn to_js(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn range_to_js(error: RangeError) -> JsValue {
    to_js(AppError::Range(error))
}
