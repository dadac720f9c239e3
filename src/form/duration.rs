//! Trade duration derivation
//!
//! Derives a display duration from the entry and exit time-of-day fields.
//! Re-derived on every edit of either field; pure, no side effects.

use chrono::NaiveTime;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Derive a human-readable duration from two `HH:MM` time-of-day strings
///
/// Both times are treated as falling on the same calendar day. A negative
/// difference is wrapped by 24 hours: the trade is assumed to have crossed
/// midnight. Returns `None` when either input is absent or unparseable.
pub fn trade_duration(entry_time: Option<&str>, exit_time: Option<&str>) -> Option<String> {
    let entry = parse_time(entry_time?)?;
    let exit = parse_time(exit_time?)?;

    let mut seconds = (exit - entry).num_seconds();
    if seconds < 0 {
        // Overnight wrap: exit before entry means the trade crossed midnight
        seconds += SECONDS_PER_DAY;
    }

    Some(format_duration(seconds))
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Format a non-negative duration, dropping leading zero units
fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
