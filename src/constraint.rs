//! Thresholds a mining run is held to.

use serde::{Deserialize, Serialize};

use crate::error::{MiningError, Result};

pub const DEFAULT_MIN_SUPPORT: u32 = 15;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.10;
pub const DEFAULT_MIN_LIFT: f64 = 1.00;

/// Immutable constraint record passed into every mining operation.
///
/// `min_support` is a transaction count, not a fraction.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub min_support: u32,
    pub min_confidence: f64,
    pub min_lift: f64,
}

impl Constraints {
    pub fn new(min_support: u32, min_confidence: f64, min_lift: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            min_lift,
        }
    }
    /// Checks every threshold against a collection of `transactions`
    /// transactions.
    pub fn validate(&self, transactions: usize) -> Result<()> {
        check_min_support(self.min_support, transactions)?;
        self.validate_thresholds()
    }
    /// Checks the rule thresholds only.
    pub fn validate_thresholds(&self) -> Result<()> {
        if !self.min_confidence.is_finite() || !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(MiningError::constraint(
                "min_confidence",
                format!("{} is outside [0, 1]", self.min_confidence),
            ));
        }
        if !self.min_lift.is_finite() || self.min_lift < 0.0 {
            return Err(MiningError::constraint(
                "min_lift",
                format!("{} is not a non-negative number", self.min_lift),
            ));
        }
        Ok(())
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SUPPORT, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_LIFT)
    }
}

/// Minimum support must lie in `[1, N]`. An empty collection has nothing to
/// mine, so any threshold is accepted for it.
pub fn check_min_support(min_support: u32, transactions: usize) -> Result<()> {
    if transactions == 0 {
        return Ok(());
    }
    let min_support = min_support as usize;
    if min_support == 0 || min_support > transactions {
        return Err(MiningError::constraint(
            "min_support",
            format!("{min_support} is outside [1, {transactions}]"),
        ));
    }
    Ok(())
}
