use crate::config::ZoomConfig;
use crate::domain::liquidity::price_math::TICK_BASE;
use crate::domain::pool::ZoomKey;
use crate::domain::range::{PriceContext, PriceRange};

/// Scale and translate over the tick-index domain. Identity shows the base window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    /// Shift of the window centre, in ticks.
    pub translate: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { scale: 1.0, translate: 0.0 };
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Interval of (fractional) tick indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDomain {
    pub start: f64,
    pub end: f64,
}

impl TickDomain {
    pub fn new(a: f64, b: f64) -> Self {
        Self { start: a.min(b), end: a.max(b) }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, tick: f64) -> bool {
        tick >= self.start && tick <= self.end
    }

    /// Base window showing `[price · initial_min, price · initial_max]` of the displayed
    /// price at `tick`. Inversion mirrors the multiples into tick space.
    pub fn around_tick(tick: i32, config: &ZoomConfig, invert: bool) -> Self {
        let offset = |multiple: f64| multiple.ln() / TICK_BASE.ln();
        let (low, high) = if invert {
            (-offset(config.initial_max), -offset(config.initial_min))
        } else {
            (offset(config.initial_min), offset(config.initial_max))
        };
        Self::new(tick as f64 + low, tick as f64 + high)
    }
}

/// View parameters of one chart. Each instance owns its own settle timer.
#[derive(Debug, Clone)]
pub struct ZoomState {
    config: ZoomConfig,
    key: Option<ZoomKey>,
    base: Option<TickDomain>,
    transform: ZoomTransform,
    settle_deadline_ms: Option<u64>,
}

impl ZoomState {
    pub fn new(config: ZoomConfig) -> Self {
        Self { config, key: None, base: None, transform: ZoomTransform::IDENTITY, settle_deadline_ms: None }
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn key(&self) -> Option<&ZoomKey> {
        self.key.as_ref()
    }

    /// Adopts a zoom configuration. A different key resets the view to `base`;
    /// the same key keeps the user's transform. Returns whether a reset happened.
    pub fn configure(&mut self, key: ZoomKey, base: TickDomain) -> bool {
        if self.key.as_ref() == Some(&key) && self.base.is_some() {
            return false;
        }
        self.key = Some(key);
        self.base = Some(base);
        self.reset();
        true
    }

    /// Replaces the base window, keeping the scale and the visible centre.
    pub fn rebase(&mut self, base: TickDomain) {
        if let Some(visible) = self.visible_domain() {
            self.transform.translate = visible.center() - base.center();
        }
        self.base = Some(base);
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.settle_deadline_ms = None;
    }

    pub fn set_transform(&mut self, transform: ZoomTransform, now_ms: u64) {
        self.transform = ZoomTransform {
            scale: transform.scale.clamp(self.config.min_scale, self.config.max_scale),
            translate: transform.translate,
        };
        self.record_interaction(now_ms);
    }

    /// Zoom keeping the tick under the anchor stable.
    pub fn zoom_at(&mut self, factor: f64, anchor_ratio: f64, now_ms: u64) {
        let (Some(base), Some(visible)) = (self.base, self.visible_domain()) else {
            return;
        };
        if !(factor > 0.0) || !factor.is_finite() {
            return;
        }
        let anchor_ratio = anchor_ratio.clamp(0.0, 1.0);
        let anchor_tick = visible.start + visible.span() * anchor_ratio;

        let scale = (self.transform.scale * factor).clamp(self.config.min_scale, self.config.max_scale);
        let span = base.span() / scale;
        let start = anchor_tick - span * anchor_ratio;

        self.transform = ZoomTransform { scale, translate: start + span / 2.0 - base.center() };
        self.record_interaction(now_ms);
    }

    /// Pan by a fraction of the visible width; positive moves towards higher ticks.
    pub fn pan(&mut self, width_ratio: f64, now_ms: u64) {
        let Some(visible) = self.visible_domain() else {
            return;
        };
        self.transform.translate += visible.span() * width_ratio;
        self.record_interaction(now_ms);
    }

    pub fn visible_domain(&self) -> Option<TickDomain> {
        let base = self.base?;
        let half = base.span() / self.transform.scale / 2.0;
        let center = base.center() + self.transform.translate;
        Some(TickDomain::new(center - half, center + half))
    }

    /// Visible window in displayed prices, ascending.
    pub fn visible_price_window(&self, context: &PriceContext) -> Option<(f64, f64)> {
        let visible = self.visible_domain()?;
        let scale = context.decimals.scale();
        let price = |tick: f64| {
            let raw = TICK_BASE.powf(tick) * scale;
            if context.invert { 1.0 / raw } else { raw }
        };
        let (a, b) = (price(visible.start), price(visible.end));
        Some((a.min(b), a.max(b)))
    }

    /// Offer a reset when both handles are off screen or the zoom went past its bounds.
    pub fn should_show_reset(&self, range: &PriceRange) -> bool {
        let scale = self.transform.scale;
        if scale > self.config.reset_scale_upper || scale < self.config.reset_scale_lower {
            return true;
        }
        match (self.visible_domain(), range.lower_tick, range.upper_tick) {
            (Some(visible), Some(lower), Some(upper)) => {
                !visible.contains(lower as f64) && !visible.contains(upper as f64)
            }
            _ => false,
        }
    }

    pub fn record_interaction(&mut self, now_ms: u64) {
        self.settle_deadline_ms = Some(now_ms.saturating_add(self.config.settle_ms));
    }

    pub fn is_settled(&self, now_ms: u64) -> bool {
        self.settle_deadline_ms.is_none_or(|deadline| now_ms >= deadline)
    }
}
