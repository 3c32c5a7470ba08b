//! Token budgets — how much of the context window a section may claim.
//!
//! A budget is either a fixed token count, a fraction of whatever remains
//! after fixed sections reserved their share, or unbounded (the `-1`
//! sentinel in configuration files). Validation happens here, at
//! construction time — a malformed budget never survives to render time.

use crate::error::Error;

/// A section's configured token budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenBudget {
    /// Consume whatever remains after other allocations.
    Unbounded,
    /// A fixed token count. Content over the ceiling is truncated.
    Fixed(usize),
    /// A fraction in (0, 1] of the budget remaining after fixed sections.
    Proportion(f64),
}

impl TokenBudget {
    /// A fixed budget of `tokens`.
    pub fn fixed(tokens: usize) -> Self {
        Self::Fixed(tokens)
    }

    /// A proportional budget. Fails fast unless `fraction` is in (0, 1].
    pub fn proportion(fraction: f64) -> Result<Self, Error> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(Error::config(format!(
                "token fraction must be in (0, 1], got {fraction}"
            )));
        }
        Ok(Self::Proportion(fraction))
    }

    /// Decode a raw numeric budget, as found in configuration files:
    /// `-1` is unbounded, values in (0, 1] are proportional, and integral
    /// values above 1 (or exactly 0) are fixed counts.
    pub fn from_value(value: f64) -> Result<Self, Error> {
        if value == -1.0 {
            return Ok(Self::Unbounded);
        }
        if value < 0.0 || !value.is_finite() {
            return Err(Error::config(format!(
                "token budget must be -1, a fraction in (0, 1], or a non-negative integer, got {value}"
            )));
        }
        if value > 0.0 && value <= 1.0 {
            return Self::proportion(value);
        }
        if value.fract() != 0.0 {
            return Err(Error::config(format!(
                "fixed token budget must be an integer, got {value}"
            )));
        }
        Ok(Self::Fixed(value as usize))
    }

    /// Whether this budget is a fixed token count.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Whether this budget participates in the proportional split.
    pub fn is_proportional(&self) -> bool {
        matches!(self, Self::Proportion(_))
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::Unbounded
    }
}
