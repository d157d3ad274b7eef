//! Display formatting for durations and dollar amounts.

use std::time::Duration;

/// Format a duration as `H:MM:SS`, rounding to whole seconds.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs_f64().round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Format a duration in seconds with two decimals (per-call timings).
pub fn format_secs(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

/// Format a dollar cost to four decimal places.
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.4}")
}
