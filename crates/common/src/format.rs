//! Human-readable duration formatting

/// Format a minute count the way dashboards show latencies:
/// under an hour as whole minutes, otherwise hours with one decimal.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{} minutes", minutes.round());
    }
    let hours = (minutes / 60.0 * 10.0).round() / 10.0;
    format!("{} hours", hours)
}
