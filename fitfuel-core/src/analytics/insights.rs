//! Rule-based insight generation.
//!
//! Each rule looks at one independent signal in the payload and emits at most
//! one insight. Rules run in a fixed order so the list is stable for a given
//! payload.

use serde::{Deserialize, Serialize};

use crate::types::AnalyticsPayload;

/// Overall compliance (percent) above which the user is congratulated.
pub const HIGH_COMPLIANCE_PERCENT: f64 = 80.0;

/// Timing consistency score above which the user is congratulated.
pub const HIGH_CONSISTENCY_SCORE: f64 = 0.8;

/// Which signal produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Compliance,
    Nutrition,
    Timing,
    Health,
}

/// A short observation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Generate insights for a payload.
///
/// Rule order: compliance, nutrition, timing, health. An empty payload yields
/// an empty list.
pub fn generate(payload: &AnalyticsPayload) -> Vec<Insight> {
    let mut insights = Vec::new();

    if payload.compliance_trends.overall_compliance > HIGH_COMPLIANCE_PERCENT {
        insights.push(Insight::new(
            InsightKind::Compliance,
            "Great job maintaining high compliance!",
        ));
    }

    // Only the first (most significant) gap is surfaced
    if let Some(gap) = payload.nutritional_trends.gaps.first() {
        insights.push(Insight::new(
            InsightKind::Nutrition,
            format!("Consider increasing {} intake", gap.nutrient),
        ));
    }

    if payload.timing_patterns.consistency_score > HIGH_CONSISTENCY_SCORE {
        insights.push(Insight::new(
            InsightKind::Timing,
            "Excellent meal timing consistency",
        ));
    }

    if let Some(signal) = strongest_energy_signal(payload) {
        insights.push(Insight::new(
            InsightKind::Health,
            format!("{} has the most positive impact on your energy", signal),
        ));
    }

    insights
}

/// Signal with the highest energy-impact score.
///
/// Entries are visited in ascending key order and only a strictly greater
/// score replaces the current best, so ties go to the smallest key.
/// Non-finite scores are skipped.
fn strongest_energy_signal(payload: &AnalyticsPayload) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;

    for (signal, &score) in &payload.health_correlations.energy_levels {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((signal.as_str(), score)),
        }
    }

    best.map(|(signal, _)| signal)
}
