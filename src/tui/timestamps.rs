use chrono::{DateTime, Datelike, Utc};

/// Format a timeline timestamp with tiered display:
/// - Relative for <7 days: "2h ago", "3d ago"
/// - Absolute for ≥7 days: "Jan 15 09:30", "Dec 3, 2024 18:05"
///
/// Archived history is mostly old, so the absolute tier keeps time of day;
/// without it adjacent messages collapse onto the same label.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() >= 0 && duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d %H:%M").to_string()
    } else {
        timestamp.format("%b %-d, %Y %H:%M").to_string()
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}
