//! Formatting helpers for CLI output.

use chrono::Weekday;

/// Minutes as `HHh MMm`, prefixed with `-` when negative.
pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.unsigned_abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}

/// English weekday name, `?` when the portal sent a code we don't know.
pub fn weekday_name(day: Option<Weekday>) -> &'static str {
    match day {
        Some(Weekday::Mon) => "Monday",
        Some(Weekday::Tue) => "Tuesday",
        Some(Weekday::Wed) => "Wednesday",
        Some(Weekday::Thu) => "Thursday",
        Some(Weekday::Fri) => "Friday",
        Some(Weekday::Sat) => "Saturday",
        Some(Weekday::Sun) => "Sunday",
        None => "?",
    }
}

/// Cuts `s` to `width` characters, ending with `…` when shortened.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
