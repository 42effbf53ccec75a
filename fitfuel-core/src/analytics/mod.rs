//! Analytics module for fitfuel
//!
//! Turns a historical statistics payload into display-ready metrics:
//! - [`trend`]: server trend labels to [`TrendDirection`]
//! - [`insights`]: rule-based observations
//! - [`monthly`]: monthly counters rendered as text
//!
//! Everything here is pure and deterministic; [`summarize`] combines the three
//! into a [`HistorySummary`] that the history coordinator publishes.

pub mod insights;
pub mod monthly;
pub mod trend;

pub use insights::{Insight, InsightKind};
pub use monthly::MonthlyStatsSummary;
pub use trend::TrendDirection;

use serde::Serialize;

use crate::types::AnalyticsPayload;

/// Derived metrics for one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySummary {
    /// Overall compliance percentage
    pub average_compliance: f64,
    /// Timing consistency score (0..1)
    pub consistency_score: f64,
    pub compliance_trend: TrendDirection,
    pub consistency_trend: TrendDirection,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub monthly_stats: Option<MonthlyStatsSummary>,
}

/// Run the full pipeline over a payload.
pub fn summarize(payload: &AnalyticsPayload) -> HistorySummary {
    HistorySummary {
        average_compliance: payload.compliance_trends.overall_compliance,
        consistency_score: payload.timing_patterns.consistency_score,
        compliance_trend: trend::classify(payload.compliance_trends.trend.as_deref()),
        consistency_trend: trend::classify(payload.timing_patterns.trend.as_deref()),
        insights: insights::generate(payload),
        recommendations: payload.recommendations.clone(),
        monthly_stats: payload.monthly_stats.as_ref().map(monthly::format),
    }
}
