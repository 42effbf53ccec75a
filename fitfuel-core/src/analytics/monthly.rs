//! Display summaries for monthly statistics.

use serde::{Deserialize, Serialize};

use crate::format::{format_percent, join_entries};
use crate::types::{MealResult, MonthlyStats};

/// Display-ready rendering of [`MonthlyStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsSummary {
    pub days_at_home: u32,
    pub days_outside: u32,
    /// e.g. "breakfast (2), lunch (0)"
    pub skipped_meals_text: String,
    /// e.g. "dinner (87.5%)"
    pub similarity_text: String,
    /// e.g. "dinner (18/2)", passes then fails
    pub pass_fail_text: String,
}

impl MonthlyStatsSummary {
    /// One line per stat, in the order the history screen lists them.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Days at home: {}", self.days_at_home),
            format!("Days outside: {}", self.days_outside),
            format!("Skipped meals: {}", self.skipped_meals_text),
            format!("Average similarity: {}", self.similarity_text),
            format!("Results: {}", self.pass_fail_text),
        ]
    }
}

/// Render monthly stats. Entries within each map are key-sorted.
pub fn format(stats: &MonthlyStats) -> MonthlyStatsSummary {
    MonthlyStatsSummary {
        days_at_home: stats.location_summary.days_at_home,
        days_outside: stats.location_summary.days_outside,
        skipped_meals_text: join_entries(&stats.skipped_meals, |count: &u32| {
            count.to_string()
        }),
        similarity_text: join_entries(&stats.average_similarity, |pct: &f64| {
            format_percent(*pct)
        }),
        pass_fail_text: join_entries(&stats.meal_results, |result: &MealResult| {
            format!("{}/{}", result.passes, result.fails)
        }),
    }
}
