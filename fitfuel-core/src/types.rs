//! Core domain types for fitfuel
//!
//! These types mirror the analytics service's historical statistics payload
//! and the time periods the history screen can request.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Payload** | The full analytics response for a date range |
//! | **Compliance** | How closely logged meals followed the plan, in percent |
//! | **Consistency** | How regular meal times were, as a 0..1 score |
//! | **Gap** | A nutrient the service thinks is under-consumed |
//! | **Similarity** | How close an eaten meal was to the planned one, in percent |
//!
//! Every payload field defaults when missing, so a partially populated
//! response still decodes and simply produces fewer insights.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================
// Payload
// ============================================

/// Historical statistics for one date range, as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsPayload {
    pub compliance_trends: ComplianceTrends,
    pub timing_patterns: TimingPatterns,
    pub nutritional_trends: NutritionalTrends,
    pub health_correlations: HealthCorrelations,
    /// Free-text suggestions from the service, shown verbatim
    pub recommendations: Vec<String>,
    pub monthly_stats: Option<MonthlyStats>,
}

/// Plan compliance over the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceTrends {
    /// Percentage in [0, 100]
    pub overall_compliance: f64,
    /// Server trend label (e.g. "slightly_improving")
    pub trend: Option<String>,
}

/// Meal timing regularity over the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingPatterns {
    /// Score in [0, 1]
    pub consistency_score: f64,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionalTrends {
    /// Most significant gap first
    pub gaps: Vec<NutritionalGap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionalGap {
    pub nutrient: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthCorrelations {
    /// Signal name (usually a meal category) to energy-impact score
    pub energy_levels: BTreeMap<String, f64>,
}

// ============================================
// Monthly stats
// ============================================

/// Per-category counters for the month.
///
/// Maps are key-ordered so every rendering of them is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStats {
    pub location_summary: LocationSummary,
    /// Meal category to number of skipped meals
    pub skipped_meals: BTreeMap<String, u32>,
    /// Meal category to average similarity percentage in [0, 100]
    pub average_similarity: BTreeMap<String, f64>,
    pub meal_results: BTreeMap<String, MealResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSummary {
    pub days_at_home: u32,
    pub days_outside: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealResult {
    pub passes: u32,
    pub fails: u32,
}

// ============================================
// Periods
// ============================================

/// Time window the history screen can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
        }
    }

    /// Date range ending at `now`.
    ///
    /// Month and year are calendar subtractions; a day that doesn't exist in
    /// the target month is clamped to the month's last day (Mar 31 -> Feb 28).
    pub fn date_range(&self, now: DateTime<Utc>) -> DateRange {
        let start = match self {
            TimePeriod::Week => now - Duration::days(7),
            TimePeriod::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            TimePeriod::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        };
        DateRange { start, end: now }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimePeriod::Week),
            "month" => Ok(TimePeriod::Month),
            "year" => Ok(TimePeriod::Year),
            other => Err(format!(
                "unknown period '{}', expected week, month or year",
                other
            )),
        }
    }
}

/// Inclusive range of instants passed to the analytics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
