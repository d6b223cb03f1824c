use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Months, NaiveDate};

/// Dates as the portal shows and accepts them, e.g. `03.08.2020`.
pub const PORTAL_DATE_FORMAT: &str = "%d.%m.%Y";

/// Timestamps embedded in the portal's JSON, e.g. `2020-04-10T00:00:00`.
pub const PORTAL_JSON_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Timestamps inside submitted work logs, e.g. `2020-02-25 13:40:33.000`.
pub const PORTAL_LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn to_portal_date(d: NaiveDate) -> String {
    d.format(PORTAL_DATE_FORMAT).to_string()
}

/// All dates from `start` to `end`, both included. Empty if `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn months_before(d: NaiveDate, months: u32) -> AppResult<NaiveDate> {
    d.checked_sub_months(Months::new(months))
        .ok_or_else(|| AppError::InvalidDate(format!("{} minus {} months", d, months)))
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut d) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return out;
    };

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parses the `d.M.` shorthand used by `report --date` (e.g. `24.12.`)
/// in the given year.
pub fn parse_day_month(s: &str, year: i32) -> AppResult<NaiveDate> {
    let parts: Vec<&str> = s.trim().trim_end_matches('.').split('.').collect();
    if parts.len() != 2 {
        return Err(AppError::InvalidDate(s.to_string()));
    }

    let day: u32 = parts[0]
        .parse()
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}
