use crate::{
    application::events::{ChartEvent, ChartGesture, EventDispatcher, InMemoryEventDispatcher},
    config::ChartConfig,
    domain::{
        chart::{AxisLabelPlanner, AxisTick},
        errors::RangeResult,
        liquidity::{
            CurvePartitioner, LiquidityCurve, LiquidityCurveBuilder, PriceInterval, PriceWindow, SeriesPoint,
            tick_to_price,
        },
        logging::LogComponent,
        pool::{PoolSnapshot, TickSpacing, TokenDecimals},
        range::{CommitOutcome, PriceContext, PriceRange, RangeDisplay, RangeSelectionController},
    },
    log_debug, log_info, log_warn,
    view_state::{TickDomain, ZoomState},
};
use serde::Serialize;
use std::sync::Arc;

/// Whether the chart has something to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum ChartStatus {
    AwaitingData,
    Ready,
    /// The snapshot could not be turned into a curve; the chart shows its empty state.
    NoLiquidityData(String),
}

/// Everything a renderer needs for one paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    pub status: ChartStatus,
    pub current_price: Option<f64>,
    pub below_current: Vec<SeriesPoint>,
    pub above_current: Vec<SeriesPoint>,
    /// Curve restricted to the selected range, present once both bounds are set.
    pub masked: Option<Vec<SeriesPoint>>,
    pub max_liquidity: f64,
    pub visible_window: Option<PriceInterval>,
    pub axis_ticks: Vec<AxisTick>,
    pub range: RangeDisplay,
    /// Uncommitted brush while a drag is in progress.
    pub brush_preview: Option<PriceInterval>,
    pub show_zoom_reset: bool,
}

/// Owns one chart: the current snapshot, the derived curve, zoom and range selection.
///
/// Snapshot replacement swaps all derived state before returning, so a frame never
/// mixes data from two snapshots. Gestures are applied in the order they are dispatched.
#[derive(Debug)]
pub struct LiquidityChartService {
    config: ChartConfig,
    snapshot: Option<Arc<PoolSnapshot>>,
    curve: Arc<LiquidityCurve>,
    curve_window: Option<PriceWindow>,
    status: ChartStatus,
    invert: bool,
    zoom: ZoomState,
    selection: RangeSelectionController,
    axis: AxisLabelPlanner,
    dispatcher: InMemoryEventDispatcher,
}

impl LiquidityChartService {
    pub fn new(config: ChartConfig) -> Self {
        let context = PriceContext { spacing: TickSpacing::ONE, decimals: TokenDecimals::new(18, 18), invert: false };
        Self {
            snapshot: None,
            curve: Arc::new(LiquidityCurve::empty()),
            curve_window: None,
            status: ChartStatus::AwaitingData,
            invert: false,
            zoom: ZoomState::new(config.zoom),
            selection: RangeSelectionController::new(context, config.full_range_sentinel),
            axis: AxisLabelPlanner::new(config.axis.min_ticks, config.axis.max_ticks),
            dispatcher: InMemoryEventDispatcher::new(),
            config,
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.dispatcher.subscribe(handler);
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Option<Arc<PoolSnapshot>> {
        self.snapshot.clone()
    }

    pub fn curve(&self) -> Arc<LiquidityCurve> {
        Arc::clone(&self.curve)
    }

    pub fn status(&self) -> &ChartStatus {
        &self.status
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn selection(&self) -> &RangeSelectionController {
        &self.selection
    }

    pub fn range(&self) -> PriceRange {
        self.selection.range()
    }

    /// Loads an existing position's ticks.
    pub fn set_range(&mut self, range: PriceRange) -> RangeResult<CommitOutcome> {
        let outcome = self.selection.set_range(range);
        self.publish_commit(&outcome);
        outcome
    }

    /// Installs a new snapshot. A pool or spacing change resets zoom; the same pool keeps it.
    pub fn replace_snapshot(&mut self, snapshot: PoolSnapshot) -> &ChartStatus {
        let snapshot = Arc::new(snapshot);
        let context = PriceContext { spacing: snapshot.tick_spacing, decimals: snapshot.decimals, invert: self.invert };

        let base = TickDomain::around_tick(snapshot.current_tick, &self.config.zoom, self.invert);
        if self.zoom.configure(snapshot.zoom_key(), base) {
            log_debug!(
                LogComponent::Application("ChartService"),
                "zoom reset for pool {} (spacing {})",
                snapshot.id,
                snapshot.tick_spacing
            );
        }
        self.selection.set_context(context);
        self.snapshot = Some(Arc::clone(&snapshot));
        self.rebuild_curve(&snapshot);

        let event = match &self.status {
            ChartStatus::NoLiquidityData(reason) => {
                ChartEvent::LiquidityUnavailable { pool_id: snapshot.id.clone(), reason: reason.clone() }
            }
            _ => ChartEvent::SnapshotApplied { pool_id: snapshot.id.clone(), point_count: self.curve.len() },
        };
        self.dispatcher.publish(event);
        &self.status
    }

    /// Applies one gesture. Range edits that fail leave the committed range as it was.
    pub fn dispatch(&mut self, gesture: ChartGesture, now_ms: u64) -> RangeResult<CommitOutcome> {
        let outcome = match gesture {
            ChartGesture::BrushMove { domain, mode } => {
                self.selection.drag_move(domain, mode);
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::BrushEnd => self.selection.drag_end(),
            ChartGesture::BrushCancel => {
                self.selection.cancel_drag();
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::TextCommit { bound, text } => self.selection.commit_text(bound, &text),
            ChartGesture::Paste { min, max } => self.selection.paste(&min, &max),
            ChartGesture::Zoom { factor, anchor } => {
                self.zoom.zoom_at(factor, anchor, now_ms);
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::Pan { width_ratio } => {
                self.zoom.pan(width_ratio, now_ms);
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::SetTransform(transform) => {
                self.zoom.set_transform(transform, now_ms);
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::ResetZoom => {
                self.zoom.reset();
                if let Some(key) = self.zoom.key() {
                    self.dispatcher.publish(ChartEvent::ZoomReset { pool_id: key.pool_id.clone() });
                }
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::InvertToggle(invert) => {
                self.set_invert(invert);
                Ok(CommitOutcome::Unchanged)
            }
            ChartGesture::FullRange => self.selection.set_full_range(),
            ChartGesture::Step { bound, direction } => self.selection.step_bound(bound, direction),
        };

        if let Err(error) = &outcome {
            log_debug!(LogComponent::Application("ChartService"), "range edit rejected: {}", error);
        }
        self.publish_commit(&outcome);
        outcome
    }

    /// Flips the quote direction. Ticks stay put; every derived price is recomputed.
    pub fn set_invert(&mut self, invert: bool) {
        if self.invert == invert {
            return;
        }
        self.invert = invert;
        self.selection.set_invert(invert);
        if let Some(snapshot) = self.snapshot.clone() {
            self.zoom.rebase(TickDomain::around_tick(snapshot.current_tick, &self.config.zoom, invert));
            self.rebuild_curve(&snapshot);
        }
    }

    /// Rebuilds the windowed curve once zooming has settled on a new window.
    /// Returns whether a rebuild happened.
    pub fn refresh(&mut self, now_ms: u64) -> bool {
        if !self.zoom.is_settled(now_ms) {
            return false;
        }
        let Some(snapshot) = self.snapshot.clone() else {
            return false;
        };
        if self.curve_window_for(&self.selection.context()) == self.curve_window {
            return false;
        }
        self.rebuild_curve(&snapshot);
        true
    }

    pub fn frame(&mut self, now_ms: u64) -> ChartFrame {
        self.refresh(now_ms);

        let range = self.selection.range();
        let context = self.selection.context();
        let brush_preview = self.selection.pending_domain().map(|domain| {
            let (a, b) = (domain.min.as_f64(), domain.max.as_f64());
            PriceInterval { min: a.min(b), max: a.max(b) }
        });

        let Some(snapshot) = self.snapshot.as_ref() else {
            return ChartFrame {
                status: self.status.clone(),
                current_price: None,
                below_current: Vec::new(),
                above_current: Vec::new(),
                masked: None,
                max_liquidity: 0.0,
                visible_window: None,
                axis_ticks: Vec::new(),
                range: self.selection.display(),
                brush_preview,
                show_zoom_reset: false,
            };
        };

        let current_price = tick_to_price(snapshot.current_tick, snapshot.decimals, self.invert);
        let partitioned = CurvePartitioner::partition(&self.curve, current_price);
        let masked = CurvePartitioner::mask(&range, &context).map(|interval| CurvePartitioner::masked(&self.curve, interval));
        let visible_window = self.zoom.visible_price_window(&context);
        let axis_ticks = visible_window.map(|(min, max)| self.axis.plan(min, max, &context)).unwrap_or_default();

        ChartFrame {
            status: self.status.clone(),
            current_price: Some(current_price),
            below_current: partitioned.below_current,
            above_current: partitioned.above_current,
            masked,
            max_liquidity: self.curve.max_liquidity() as f64,
            visible_window: visible_window.map(|(min, max)| PriceInterval { min, max }),
            axis_ticks,
            range: self.selection.display(),
            brush_preview,
            show_zoom_reset: self.zoom.should_show_reset(&range),
        }
    }

    fn curve_window_for(&self, context: &PriceContext) -> Option<PriceWindow> {
        self.zoom
            .visible_price_window(context)
            .filter(|(min, max)| *min > 0.0 && max.is_finite())
            .map(|(min, max)| PriceWindow::new(min, max, self.config.window_margin))
    }

    fn rebuild_curve(&mut self, snapshot: &PoolSnapshot) {
        let window = self.curve_window_for(&self.selection.context());
        let mut builder = LiquidityCurveBuilder::new(self.invert);
        if let Some(window) = window {
            builder = builder.with_window(window);
        }

        match builder.build(snapshot) {
            Ok(curve) => {
                log_info!(
                    LogComponent::Application("ChartService"),
                    "curve for {} rebuilt with {} points",
                    snapshot.id,
                    curve.len()
                );
                self.curve = Arc::new(curve);
                self.status = ChartStatus::Ready;
            }
            Err(error) => {
                log_warn!(LogComponent::Application("ChartService"), "no liquidity data for {}: {}", snapshot.id, error);
                self.curve = Arc::new(LiquidityCurve::empty());
                self.status = ChartStatus::NoLiquidityData(error.to_string());
            }
        }
        self.curve_window = window;
    }

    fn publish_commit(&self, outcome: &RangeResult<CommitOutcome>) {
        if let Ok(CommitOutcome::Committed(range)) = outcome {
            self.dispatcher.publish(ChartEvent::RangeCommitted {
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
            });
        }
    }
}
