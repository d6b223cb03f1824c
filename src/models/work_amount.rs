use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Hours recorded for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkAmount {
    pub date: NaiveDate,
    pub amount: TimeDelta,
    pub entry_count: i64,
    pub lunch_break: TimeDelta,
    pub next_start_time: Option<NaiveDateTime>,
}

impl WorkAmount {
    pub fn hours(&self) -> f64 {
        self.amount.num_milliseconds() as f64 / 3_600_000.0
    }
}

/// Fractional hours as sent by the portal, e.g. `7.5`. `None` when the
/// value is not finite or lies outside what a `TimeDelta` can hold.
pub fn hours_to_duration(hours: f64) -> Option<TimeDelta> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}
