//! Range selection: bounds, the stored range and the brush/text editing protocol.

pub mod bound;
pub mod controller;

pub use bound::{Bound, DisplayBound, PriceContext, PriceRange, RangeDisplay, TickBound, tick_bound_for};
pub use controller::{BrushDomain, BrushMode, CommitOutcome, RangeSelectionController, SelectionState, StepDirection};
