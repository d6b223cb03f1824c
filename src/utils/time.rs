//! Time utilities: parsing HH:MM, Go-style durations, formatting hours.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, TimeDelta};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parses durations such as `8h`, `7h30m`, `45m` or `1h15m30s`.
pub fn parse_duration(s: &str) -> AppResult<TimeDelta> {
    let input = s.trim();
    if input.is_empty() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    let mut total = TimeDelta::zero();
    let mut number = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }

        let n: i64 = number
            .parse()
            .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
        number.clear();

        let part = match c {
            'h' => TimeDelta::try_hours(n),
            'm' => TimeDelta::try_minutes(n),
            's' => TimeDelta::try_seconds(n),
            _ => None,
        };
        total = part
            .and_then(|p| total.checked_add(&p))
            .ok_or_else(|| AppError::InvalidDuration(s.to_string()))?;
    }

    // trailing number without a unit
    if !number.is_empty() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    Ok(total)
}

/// 7.5 -> "7h 30m"
pub fn hours2readable(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{}h {:02}m", sign, m / 60, m % 60)
}
