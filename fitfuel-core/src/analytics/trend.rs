//! Trend classification.
//!
//! The analytics service reports trends as string labels. Anything outside the
//! known label set is treated as "not enough data" rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slopes smaller than this in magnitude count as stable.
const STABLE_SLOPE: f64 = 0.01;

/// Slopes larger than this in magnitude count as a full (not slight) trend.
const STRONG_SLOPE: f64 = 0.05;

/// Qualitative direction of a metric over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    SlightlyImproving,
    SlightlyDeclining,
    #[default]
    InsufficientData,
}

impl TrendDirection {
    /// Classify a server trend label. Total: unknown labels never fail.
    pub fn classify(label: Option<&str>) -> Self {
        match label {
            Some("improving") => TrendDirection::Improving,
            Some("declining") => TrendDirection::Declining,
            Some("stable") => TrendDirection::Stable,
            Some("slightly_improving") => TrendDirection::SlightlyImproving,
            Some("slightly_declining") => TrendDirection::SlightlyDeclining,
            _ => TrendDirection::InsufficientData,
        }
    }

    /// Classify a fitted slope using the same thresholds the service applies
    /// when it produces labels.
    pub fn from_slope(slope: f64) -> Self {
        if !slope.is_finite() {
            TrendDirection::InsufficientData
        } else if slope.abs() < STABLE_SLOPE {
            TrendDirection::Stable
        } else if slope > STRONG_SLOPE {
            TrendDirection::Improving
        } else if slope > 0.0 {
            TrendDirection::SlightlyImproving
        } else if slope < -STRONG_SLOPE {
            TrendDirection::Declining
        } else {
            TrendDirection::SlightlyDeclining
        }
    }

    /// Wire label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
            TrendDirection::SlightlyImproving => "slightly_improving",
            TrendDirection::SlightlyDeclining => "slightly_declining",
            TrendDirection::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TrendDirection::Improving => "Improving",
            TrendDirection::Declining => "Declining",
            TrendDirection::Stable => "Stable",
            TrendDirection::SlightlyImproving => "Slightly improving",
            TrendDirection::SlightlyDeclining => "Slightly declining",
            TrendDirection::InsufficientData => "Not enough data",
        };
        f.write_str(text)
    }
}

/// Classify a server trend label. See [`TrendDirection::classify`].
pub fn classify(label: Option<&str>) -> TrendDirection {
    TrendDirection::classify(label)
}
