//! Working hours balance: what the calendar asks for vs. what was recorded.

use crate::models::absence::{Absence, days_in_absence};
use crate::models::balance::Balance;
use crate::models::calendar_day::CalendarDay;
use crate::models::work_amount::WorkAmount;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Walks the calendar and adds up needed and actual hours.
///
/// For every workday:
/// - an absence counts as a full day worked;
/// - otherwise recorded hours count as they are;
/// - otherwise the day is reported as missing, and still counted as a full
///   day so a forgotten report doesn't skew the balance.
///
/// Non-workdays are ignored, even if hours were recorded on them.
pub fn calculate_balance(
    calendar: &[CalendarDay],
    absences: &[Absence],
    work_amounts: &[WorkAmount],
    daily_hours: f64,
) -> Balance {
    let absent: HashSet<NaiveDate> = absences.iter().flat_map(days_in_absence).collect();

    let recorded: HashMap<NaiveDate, f64> = work_amounts
        .iter()
        .map(|wa| (wa.date, wa.hours()))
        .collect();

    let mut balance = Balance::default();

    for day in calendar.iter().filter(|d| d.workday) {
        balance.needed_hours += daily_hours;

        if absent.contains(&day.date) {
            balance.actual_hours += daily_hours;
        } else if let Some(hours) = recorded.get(&day.date) {
            balance.actual_hours += hours;
        } else {
            balance.actual_hours += daily_hours;
            balance.missing_days.push(day.date);
        }
    }

    balance
}
