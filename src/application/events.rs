use crate::domain::logging::LogComponent;
use crate::domain::range::{BrushDomain, BrushMode, DisplayBound, StepDirection};
use crate::view_state::ZoomTransform;
use crate::log_debug;
use std::fmt::Debug;

/// Discrete UI input, applied strictly in the order received.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGesture {
    BrushMove { domain: BrushDomain, mode: BrushMode },
    BrushEnd,
    BrushCancel,
    TextCommit { bound: DisplayBound, text: String },
    Paste { min: String, max: String },
    Zoom { factor: f64, anchor: f64 },
    Pan { width_ratio: f64 },
    SetTransform(ZoomTransform),
    ResetZoom,
    InvertToggle(bool),
    FullRange,
    Step { bound: DisplayBound, direction: StepDirection },
}

/// Notifications for collaborators that mirror chart state (numeric inputs, URL state).
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    SnapshotApplied { pool_id: String, point_count: usize },
    LiquidityUnavailable { pool_id: String, reason: String },
    RangeCommitted { lower_tick: Option<i32>, upper_tick: Option<i32> },
    ZoomReset { pool_id: String },
}

impl ChartEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::SnapshotApplied { .. } => "SnapshotApplied",
            ChartEvent::LiquidityUnavailable { .. } => "LiquidityUnavailable",
            ChartEvent::RangeCommitted { .. } => "RangeCommitted",
            ChartEvent::ZoomReset { .. } => "ZoomReset",
        }
    }
}

pub trait EventDispatcher {
    fn publish(&self, event: ChartEvent);
}

/// Synchronous in-process dispatcher.
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    handlers: Vec<Box<dyn Fn(&ChartEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish(&self, event: ChartEvent) {
        log_debug!(
            LogComponent::Application("EventDispatcher"),
            "{} to {} handler(s)",
            event.event_type(),
            self.handlers.len()
        );
        for handler in &self.handlers {
            handler(&event);
        }
    }
}

impl Debug for InMemoryEventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEventDispatcher").field("handlers", &self.handlers.len()).finish()
    }
}
