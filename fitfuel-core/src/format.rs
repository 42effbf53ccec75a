//! Formatting helpers shared across consumers of the view-state.

use chrono::{DateTime, Utc};

/// Format a percentage with exactly one decimal place (e.g., "87.5%").
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a 0..1 score as a whole percentage (e.g., 0.83 -> "83%").
pub fn format_score(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Join `(key, rendered value)` pairs as `"key (value), key (value)"`.
///
/// Order is whatever the iterator yields; callers pass key-ordered maps.
pub fn join_entries<'a, I, F, V>(entries: I, render: F) -> String
where
    I: IntoIterator<Item = (&'a String, V)>,
    F: Fn(V) -> String,
{
    entries
        .into_iter()
        .map(|(key, value)| format!("{} ({})", key, render(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a timestamp as relative time (e.g., "2m ago").
pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 0 {
        "just now".to_string()
    } else if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds())
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else {
        ts.format("%b %d").to_string()
    }
}
