//! The snapshot published to history screen observers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::{HistorySummary, Insight, MonthlyStatsSummary, TrendDirection};
use crate::types::TimePeriod;

/// Complete UI-ready state of the history screen.
///
/// Data fields describe the last successful load. `error` and `is_loading`
/// describe the most recent request, which may have failed without touching
/// the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub is_loading: bool,
    pub error: Option<String>,
    /// Period of the loaded data
    pub period: Option<TimePeriod>,
    pub average_compliance: f64,
    pub consistency_score: f64,
    pub compliance_trend: TrendDirection,
    pub consistency_trend: TrendDirection,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub monthly_stats: Option<MonthlyStatsSummary>,
    /// When the data fields were last replaced
    pub updated_at: Option<DateTime<Utc>>,
}

impl ViewState {
    /// Fresh state for a completed load. Nothing from the previous state
    /// carries over, including any error.
    pub fn loaded(period: TimePeriod, summary: HistorySummary, at: DateTime<Utc>) -> Self {
        Self {
            is_loading: false,
            error: None,
            period: Some(period),
            average_compliance: summary.average_compliance,
            consistency_score: summary.consistency_score,
            compliance_trend: summary.compliance_trend,
            consistency_trend: summary.consistency_trend,
            insights: summary.insights,
            recommendations: summary.recommendations,
            monthly_stats: summary.monthly_stats,
            updated_at: Some(at),
        }
    }

    /// Record a failed request, leaving data fields untouched.
    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Whether any load has completed successfully.
    pub fn has_data(&self) -> bool {
        self.updated_at.is_some()
    }
}
