use crate::errors::AppResult;
use crate::models::calendar_day::{CalendarDay, weekday_from_code};
use crate::portal::wire::json_timestamp;
use crate::portal::{Accept, Session, read_json};
use crate::utils::date::to_portal_date;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

const OPERATION: &str = "getting calendar";

/// A calendar day as the portal sends it. `tes` and `dateType` are always
/// empty and `id` just follows the date, so they are not read.
#[derive(Debug, Deserialize)]
struct HrCalendarDay {
    /// e.g. "2020-04-10T00:00:00"
    #[serde(with = "json_timestamp")]
    date: NaiveDateTime,
    #[serde(rename = "workDay", default)]
    workday: bool,
    #[serde(default)]
    holiday: bool,
    #[serde(default)]
    description: String,
    /// "1" (Monday) to "7" (Sunday). Read loosely in case it comes as a number.
    #[serde(rename = "weekDay", default)]
    weekday: Value,
}

impl HrCalendarDay {
    fn into_calendar_day(self) -> CalendarDay {
        let code = match &self.weekday {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };

        CalendarDay {
            date: self.date.date(),
            workday: self.workday,
            holiday_calc: self.holiday,
            description: self.description,
            weekday: weekday_from_code(&code),
        }
    }
}

impl Session {
    /// Work calendar for `[start, end]`, one entry per day, by date.
    pub fn calendar(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<CalendarDay>> {
        let params = [
            ("startDate", to_portal_date(start)),
            ("endDate", to_portal_date(end)),
        ];

        // Without Accept: application/json the endpoint doesn't answer JSON.
        let resp = self.get_form(OPERATION, &self.endpoints().calendar(), &params, Accept::Json)?;
        let raw: Vec<HrCalendarDay> = read_json(OPERATION, resp)?;

        let mut days: Vec<CalendarDay> = raw
            .into_iter()
            .map(HrCalendarDay::into_calendar_day)
            .collect();
        days.sort_by_key(|d| d.date);

        Ok(days)
    }
}
