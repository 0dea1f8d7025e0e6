//! Formatting helpers for share metadata

use crate::share::now_millis;

/// Formats an epoch millisecond timestamp as relative time
///
/// Produces strings like "5 min ago" or "2 weeks ago". Timestamps come from
/// share tokens and cannot be trusted, so future or absurd values read as
/// "just now" instead of overflowing.
///
/// # Arguments
///
/// * `millis`: Milliseconds since the Unix epoch
pub fn format_age(millis: i64) -> String {
    format_age_at(millis, now_millis())
}

fn format_age_at(millis: i64, now: i64) -> String {
    let secs = now.saturating_sub(millis).max(0) / 1000;
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Formats byte count as human readable size
///
/// Uses binary prefixes with two decimals for KB and MB, e.g. "512 bytes",
/// "1.50 KB", "2.00 MB".
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
