//! Risk-tier mapping over the classifier's fake probability.
//!
//! The thresholds are part of the external contract: the ledger-write
//! decision keys off [`MEDIUM_RISK_THRESHOLD`], so they are exposed as named
//! constants rather than inlined.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probabilities at or above this are at least [`RiskLevel::Medium`].
///
/// This is also the reporting boundary: callers record a profile to the
/// ledger only when `fake_probability >= MEDIUM_RISK_THRESHOLD`.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Probabilities at or above this are [`RiskLevel::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Discrete risk tier for a fake probability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a fake probability to its risk tier.
    ///
    /// Total over all finite inputs: `p >= 0.7` is high, `0.4 <= p < 0.7`
    /// is medium, everything below is low.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if probability >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Lowercase name, as consumed by the reporting collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
