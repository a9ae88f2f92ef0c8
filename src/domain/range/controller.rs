use super::bound::{Bound, DisplayBound, PriceContext, PriceRange, RangeDisplay, tick_bound_for};
use crate::domain::errors::{RangeError, RangeResult};
use crate::domain::liquidity::price_math::{
    max_usable_tick, min_usable_tick, nearest_usable_tick, price_to_closest_tick, unbounded_price_tick,
    zero_price_tick,
};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use strum::{AsRefStr, EnumString};

/// What kind of brush interaction produced a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BrushMode {
    /// The whole brush was moved.
    Drag,
    /// A single handle was moved.
    Handle,
    /// The brush was reset programmatically.
    Reset,
}

impl BrushMode {
    /// Handle drags and resets may move a bound away from its limit.
    fn releases_limits(self) -> bool {
        matches!(self, BrushMode::Handle | BrushMode::Reset)
    }
}

/// Brush selection in displayed price space, left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushDomain {
    pub min: Bound,
    pub max: Bound,
}

impl BrushDomain {
    pub fn new(min: Bound, max: Bound) -> Self {
        Self { min, max }
    }

    pub fn from_prices(min: f64, max: f64, sentinel: f64) -> Self {
        Self { min: Bound::from_display(min, sentinel), max: Bound::from_display(max, sentinel) }
    }

    fn get(&self, display: DisplayBound) -> Bound {
        match display {
            DisplayBound::Min => self.min,
            DisplayBound::Max => self.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    Idle,
    Dragging { pending: BrushDomain, mode: BrushMode },
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StepDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(PriceRange),
    Unchanged,
}

/// Owns the stored range and turns brush gestures and typed prices into usable ticks.
///
/// Every mutation goes through `&mut self`, so edits are applied one at a time in the
/// order they arrive. A failed edit returns an error and leaves the range untouched.
#[derive(Debug, Clone)]
pub struct RangeSelectionController {
    range: PriceRange,
    state: SelectionState,
    context: PriceContext,
    full_range_sentinel: f64,
}

impl RangeSelectionController {
    pub fn new(context: PriceContext, full_range_sentinel: f64) -> Self {
        Self { range: PriceRange::default(), state: SelectionState::Idle, context, full_range_sentinel }
    }

    pub fn range(&self) -> PriceRange {
        self.range
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn context(&self) -> PriceContext {
        self.context
    }

    pub fn display(&self) -> RangeDisplay {
        self.range.display(&self.context)
    }

    /// Domain of the drag in progress, for previewing the brush before it commits.
    pub fn pending_domain(&self) -> Option<BrushDomain> {
        match self.state {
            SelectionState::Dragging { pending, .. } => Some(pending),
            _ => None,
        }
    }

    /// Swaps pricing parameters. Stored ticks are re-snapped when the spacing changes.
    pub fn set_context(&mut self, context: PriceContext) {
        if context.spacing != self.context.spacing {
            let snap = |tick: Option<i32>| tick.map(|t| nearest_usable_tick(t, context.spacing));
            let resnapped = PriceRange { lower_tick: snap(self.range.lower_tick), upper_tick: snap(self.range.upper_tick) };
            self.range = if resnapped.is_ordered() { resnapped } else { PriceRange::default() };
        }
        self.context = context;
        self.state = SelectionState::Idle;
    }

    pub fn set_invert(&mut self, invert: bool) {
        self.context.invert = invert;
    }

    /// Replaces the range wholesale, e.g. when a position is loaded.
    pub fn set_range(&mut self, range: PriceRange) -> RangeResult<CommitOutcome> {
        if let (Some(lower), Some(upper)) = (range.lower_tick, range.upper_tick) {
            if lower >= upper {
                return Err(RangeError::InvalidRangeDiscarded { lower, upper });
            }
        }
        let spacing = self.context.spacing;
        let snap = |tick: Option<i32>| tick.map(|t| nearest_usable_tick(t, spacing));
        let snapped = PriceRange { lower_tick: snap(range.lower_tick), upper_tick: snap(range.upper_tick) };
        self.commit(snapped)
    }

    pub fn clear(&mut self) {
        self.range = PriceRange::default();
        self.state = SelectionState::Idle;
    }

    pub fn drag_move(&mut self, pending: BrushDomain, mode: BrushMode) {
        self.state = SelectionState::Dragging { pending, mode };
    }

    pub fn cancel_drag(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn drag_end(&mut self) -> RangeResult<CommitOutcome> {
        let SelectionState::Dragging { pending, mode } = self.state else {
            return Err(RangeError::NoActiveDrag);
        };
        self.state = SelectionState::Committing;
        let outcome = self.on_brush_domain_change(pending, mode);
        self.state = SelectionState::Idle;
        outcome
    }

    /// Applies a brush domain. Each edge is taken only if its bound is not pinned at a
    /// limit (unless the mode releases limits) and its value actually moved.
    pub fn on_brush_domain_change(&mut self, domain: BrushDomain, mode: BrushMode) -> RangeResult<CommitOutcome> {
        let accepted: Vec<DisplayBound> = [DisplayBound::Min, DisplayBound::Max]
            .into_iter()
            .filter(|display| {
                let bound = tick_bound_for(*display, self.context.invert);
                let locked = self.range.at_limit(bound, self.context.spacing) && !mode.releases_limits();
                !locked && self.value_changed(*display, domain.get(*display))
            })
            .collect();

        match accepted.as_slice() {
            [] => Ok(CommitOutcome::Unchanged),
            [display] => self.set_bound(*display, domain.get(*display)),
            _ => self.set_bounds(domain.min, domain.max),
        }
    }

    /// Typed price for one edge. Pinned edges are display-only.
    pub fn commit_text(&mut self, display: DisplayBound, text: &str) -> RangeResult<CommitOutcome> {
        let bound = tick_bound_for(display, self.context.invert);
        if self.range.at_limit(bound, self.context.spacing) {
            return Err(RangeError::BoundAtLimit);
        }
        let value = Bound::parse(text).ok_or_else(|| RangeError::ConversionUnresolved(text.to_string()))?;
        self.set_bound(display, value)
    }

    /// Pasted `min, max` pair, committed together or not at all.
    pub fn paste(&mut self, min_text: &str, max_text: &str) -> RangeResult<CommitOutcome> {
        let min = Bound::parse(min_text).ok_or_else(|| RangeError::ConversionUnresolved(min_text.to_string()))?;
        let max = Bound::parse(max_text).ok_or_else(|| RangeError::ConversionUnresolved(max_text.to_string()))?;
        self.set_bounds(min, max)
    }

    pub fn set_full_range(&mut self) -> RangeResult<CommitOutcome> {
        self.set_bounds(Bound::Finite(0.0), Bound::Unbounded)
    }

    /// Moves one displayed edge by a single tick spacing.
    pub fn step_bound(&mut self, display: DisplayBound, direction: StepDirection) -> RangeResult<CommitOutcome> {
        let bound = tick_bound_for(display, self.context.invert);
        let current = self
            .range
            .tick(bound)
            .ok_or_else(|| RangeError::ConversionUnresolved(format!("{:?} bound is unset", display)))?;

        let spacing = self.context.spacing;
        // Under inversion a higher displayed price is a lower tick.
        let sign = match (direction, self.context.invert) {
            (StepDirection::Up, false) | (StepDirection::Down, true) => 1,
            (StepDirection::Down, false) | (StepDirection::Up, true) => -1,
        };
        let stepped = (current + sign * spacing.value()).clamp(min_usable_tick(spacing), max_usable_tick(spacing));
        self.commit(self.range.with_tick(bound, stepped))
    }

    /// Single-edge update: convert, snap, keep the range ordered.
    pub fn set_bound(&mut self, display: DisplayBound, value: Bound) -> RangeResult<CommitOutcome> {
        let tick = self.resolve_tick(value)?;
        let bound = tick_bound_for(display, self.context.invert);
        self.commit(self.range.with_tick(bound, tick))
    }

    /// Both-edge update in displayed order. Discarded whole unless `lower < upper`.
    pub fn set_bounds(&mut self, min: Bound, max: Bound) -> RangeResult<CommitOutcome> {
        let min_tick = self.resolve_tick(min)?;
        let max_tick = self.resolve_tick(max)?;
        let candidate = PriceRange::default()
            .with_tick(tick_bound_for(DisplayBound::Min, self.context.invert), min_tick)
            .with_tick(tick_bound_for(DisplayBound::Max, self.context.invert), max_tick);
        self.commit(candidate)
    }

    /// Usable tick for a displayed value. Zero and the unbounded band snap to the extremes.
    pub fn resolve_tick(&self, value: Bound) -> RangeResult<i32> {
        let PriceContext { spacing, decimals, invert } = self.context;
        match value {
            Bound::Unbounded => Ok(unbounded_price_tick(spacing, invert)),
            Bound::Finite(v) if v.is_nan() => Err(RangeError::ConversionUnresolved(v.to_string())),
            Bound::Finite(v) if v <= 0.0 => Ok(zero_price_tick(spacing, invert)),
            Bound::Finite(v) if v >= self.full_range_sentinel => Ok(unbounded_price_tick(spacing, invert)),
            Bound::Finite(v) => price_to_closest_tick(v, decimals, invert).map(|tick| nearest_usable_tick(tick, spacing)),
        }
    }

    fn value_changed(&self, display: DisplayBound, value: Bound) -> bool {
        let Some(current) = self.range.display_price(display, &self.context) else {
            return true;
        };
        let next = match value {
            Bound::Finite(v) if v <= 0.0 => 0.0,
            other => other.as_f64(),
        };
        if current.is_infinite() || next.is_infinite() {
            return current != next;
        }
        (current - next).abs() > 1e-12 * current.abs().max(next.abs())
    }

    fn commit(&mut self, candidate: PriceRange) -> RangeResult<CommitOutcome> {
        if let (Some(lower), Some(upper)) = (candidate.lower_tick, candidate.upper_tick) {
            if lower >= upper {
                log_debug!(
                    LogComponent::Domain("RangeSelection"),
                    "discarding inverted range {}..{}",
                    lower,
                    upper
                );
                return Err(RangeError::InvalidRangeDiscarded { lower, upper });
            }
        }
        if candidate == self.range {
            return Ok(CommitOutcome::Unchanged);
        }
        self.range = candidate;
        log_debug!(
            LogComponent::Domain("RangeSelection"),
            "committed range {:?}..{:?}",
            candidate.lower_tick,
            candidate.upper_tick
        );
        Ok(CommitOutcome::Committed(candidate))
    }
}
