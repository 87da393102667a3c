// Display formatting helpers
use chrono::{DateTime, Utc};

const SUFFIXES: [&str; 4] = ["k", "m", "b", "t"];

/// Abbreviate a count with at most one decimal: `11342` becomes `11.3k`.
///
/// A value that rounds up to the next thousand moves to the next suffix
/// (`999_990` is `1m`, not `1000k`).
pub fn format_big_number(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }

    let mut value = n as f64;
    let mut suffix = "";
    for next in SUFFIXES {
        if (value * 10.0).round() / 10.0 < 1000.0 {
            break;
        }
        value /= 1000.0;
        suffix = next;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}{suffix}")
    } else {
        format!("{rounded:.1}{suffix}")
    }
}

/// `Jan 05, 2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Shorten `s` to `max_len` characters, ending in "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
