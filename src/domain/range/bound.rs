use crate::domain::liquidity::price_math::{Limit, limit_of, tick_to_price};
use crate::domain::pool::{TickSpacing, TokenDecimals};
use serde::Serialize;

/// A displayed price edge. Replaces the `0` / `MAX_SAFE_INTEGER` sentinels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    /// Classifies a raw brush value; anything at or past `sentinel` means "no upper edge".
    pub fn from_display(value: f64, sentinel: f64) -> Self {
        if value.is_nan() {
            Bound::Finite(f64::NAN)
        } else if value >= sentinel || value == f64::INFINITY {
            Bound::Unbounded
        } else {
            Bound::Finite(value)
        }
    }

    /// Parses text typed into a price input: `0`, `∞`, `inf`, `1,234.5`.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "∞" | "inf" | "infinity" => return Some(Bound::Unbounded),
            "" => return None,
            _ => {}
        }
        let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '_').collect();
        cleaned.parse::<f64>().ok().filter(|v| !v.is_nan()).map(|v| {
            if v.is_infinite() && v > 0.0 { Bound::Unbounded } else { Bound::Finite(v) }
        })
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Bound::Finite(v) => *v,
            Bound::Unbounded => f64::INFINITY,
        }
    }
}

/// Left (Min) or right (Max) edge of the displayed price axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayBound {
    Min,
    Max,
}

/// Lower or upper tick of the stored position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickBound {
    Lower,
    Upper,
}

/// The single place where price inversion swaps roles: with `invert` the displayed
/// minimum is 1/price(upper tick), so Min edits the upper tick and Max the lower tick.
pub fn tick_bound_for(display: DisplayBound, invert: bool) -> TickBound {
    match (display, invert) {
        (DisplayBound::Min, false) | (DisplayBound::Max, true) => TickBound::Lower,
        (DisplayBound::Max, false) | (DisplayBound::Min, true) => TickBound::Upper,
    }
}

/// Stored position bounds. Either side may be unset before the user picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub lower_tick: Option<i32>,
    pub upper_tick: Option<i32>,
}

impl PriceRange {
    pub fn new(lower_tick: i32, upper_tick: i32) -> Self {
        Self { lower_tick: Some(lower_tick), upper_tick: Some(upper_tick) }
    }

    pub fn tick(&self, bound: TickBound) -> Option<i32> {
        match bound {
            TickBound::Lower => self.lower_tick,
            TickBound::Upper => self.upper_tick,
        }
    }

    pub fn with_tick(mut self, bound: TickBound, tick: i32) -> Self {
        match bound {
            TickBound::Lower => self.lower_tick = Some(tick),
            TickBound::Upper => self.upper_tick = Some(tick),
        }
        self
    }

    /// `lower < upper` whenever both are set.
    pub fn is_ordered(&self) -> bool {
        match (self.lower_tick, self.upper_tick) {
            (Some(lower), Some(upper)) => lower < upper,
            _ => true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.lower_tick.is_some() && self.upper_tick.is_some()
    }

    pub fn at_limit(&self, bound: TickBound, spacing: TickSpacing) -> bool {
        self.tick(bound).is_some_and(|tick| match (bound, limit_of(tick, spacing)) {
            (TickBound::Lower, Some(Limit::Min)) | (TickBound::Upper, Some(Limit::Max)) => true,
            _ => false,
        })
    }

    pub fn is_full_range(&self, spacing: TickSpacing) -> bool {
        self.at_limit(TickBound::Lower, spacing) && self.at_limit(TickBound::Upper, spacing)
    }

    /// Displayed price of one edge: 0 or ∞ when its tick is pinned, otherwise the tick price.
    pub fn display_price(&self, display: DisplayBound, context: &PriceContext) -> Option<f64> {
        let bound = tick_bound_for(display, context.invert);
        let tick = self.tick(bound)?;
        if self.at_limit(bound, context.spacing) {
            return Some(match display {
                DisplayBound::Min => 0.0,
                DisplayBound::Max => f64::INFINITY,
            });
        }
        Some(tick_to_price(tick, context.decimals, context.invert))
    }

    pub fn display(&self, context: &PriceContext) -> RangeDisplay {
        let min_bound = tick_bound_for(DisplayBound::Min, context.invert);
        let max_bound = tick_bound_for(DisplayBound::Max, context.invert);
        RangeDisplay {
            lower_price: self.display_price(DisplayBound::Min, context),
            upper_price: self.display_price(DisplayBound::Max, context),
            lower_at_limit: self.at_limit(min_bound, context.spacing),
            upper_at_limit: self.at_limit(max_bound, context.spacing),
        }
    }
}

/// Everything needed to turn ticks into displayed prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceContext {
    pub spacing: TickSpacing,
    pub decimals: TokenDecimals,
    pub invert: bool,
}

/// Range as the numeric inputs show it, keyed by displayed min/max.
/// Non-finite prices serialize as `null`; the `*_at_limit` flags carry the meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDisplay {
    pub lower_price: Option<f64>,
    pub upper_price: Option<f64>,
    pub lower_at_limit: bool,
    pub upper_at_limit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_text() {
        assert_eq!(Bound::parse("0"), Some(Bound::Finite(0.0)));
        assert_eq!(Bound::parse(" 1,234.5 "), Some(Bound::Finite(1234.5)));
        assert_eq!(Bound::parse("∞"), Some(Bound::Unbounded));
        assert_eq!(Bound::parse("Inf"), Some(Bound::Unbounded));
        assert_eq!(Bound::parse("abc"), None);
        assert_eq!(Bound::parse(""), None);
    }

    #[test]
    fn sentinel_band_is_unbounded() {
        assert_eq!(Bound::from_display(1e36, 1e35), Bound::Unbounded);
        assert_eq!(Bound::from_display(f64::INFINITY, 1e35), Bound::Unbounded);
        assert_eq!(Bound::from_display(12.0, 1e35), Bound::Finite(12.0));
    }

    #[test]
    fn inversion_swaps_roles() {
        assert_eq!(tick_bound_for(DisplayBound::Min, false), TickBound::Lower);
        assert_eq!(tick_bound_for(DisplayBound::Min, true), TickBound::Upper);
        assert_eq!(tick_bound_for(DisplayBound::Max, true), TickBound::Lower);
    }
}
