//! `--period` parsing for the listing commands.

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::{Datelike, NaiveDate};

/// Parse a period into an inclusive `(start, end)` date range.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidPeriod(format!(
                "{p}: start and end must have same format"
            )));
        }

        (bounds(start)?.0, bounds(end)?.1)
    } else {
        bounds(p.trim())?
    };

    if start > end {
        return Err(AppError::InvalidPeriod(format!("{p}: start is after end")));
    }

    Ok((start, end))
}

/// The current month, from the 1st to its last day.
pub fn current_month() -> AppResult<(NaiveDate, NaiveDate)> {
    let today = date::today();
    bounds(&today.format("%Y-%m").to_string())
}

/// Resolves an optional `--period` flag, defaulting to the current month.
pub fn resolve_period(period: &Option<String>) -> AppResult<(NaiveDate, NaiveDate)> {
    match period {
        Some(p) => parse_period(p),
        None => current_month(),
    }
}

/// First and last day covered by a single YYYY, YYYY-MM or YYYY-MM-DD value.
fn bounds(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let days = date::all_days_of_month(d1.year(), d1.month());
            let d2 = *days.last().ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = date::parse_date(s).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}
