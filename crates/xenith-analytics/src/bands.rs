//! Complaint bands
//!
//! Satisfaction rates are classified relative to the dataset they come from:
//! the lower and upper terciles of the observed rates become the thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Complaint severity derived from satisfaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintLevel {
    /// At or above the upper threshold
    Average,
    /// Between the thresholds
    Poor,
    /// Below the lower threshold
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl fmt::Display for ComplaintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Average => "Average",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        })
    }
}

/// Satisfaction thresholds for [`ComplaintLevel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintThresholds {
    /// Rates below this are [`ComplaintLevel::VeryPoor`]
    pub poor: u32,
    /// Rates at or above this are [`ComplaintLevel::Average`]
    pub average: u32,
}

impl Default for ComplaintThresholds {
    fn default() -> Self {
        Self {
            poor: 50,
            average: 65,
        }
    }
}

impl ComplaintThresholds {
    /// Tercile thresholds over `rates`
    ///
    /// Fewer than three rates fall back to the defaults (50 / 65).
    #[must_use]
    pub fn from_rates(rates: impl IntoIterator<Item = u32>) -> Self {
        let mut rates: Vec<u32> = rates.into_iter().collect();
        if rates.len() < 3 {
            return Self::default();
        }
        rates.sort_unstable();
        let len = rates.len();
        Self {
            poor: rates[len / 3],
            average: rates[(len * 2) / 3],
        }
    }

    /// Classify a satisfaction rate
    #[inline]
    #[must_use]
    pub fn classify(&self, rate: u32) -> ComplaintLevel {
        if rate >= self.average {
            ComplaintLevel::Average
        } else if rate >= self.poor {
            ComplaintLevel::Poor
        } else {
            ComplaintLevel::VeryPoor
        }
    }
}
