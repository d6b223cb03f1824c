use chrono::{NaiveDate, Weekday};

/// One day of the portal's work calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Whether the day should be worked.
    pub workday: bool,
    /// Whether the day counts in the annual holiday accrual. The portal calls
    /// this flag "holiday", but it has nothing to do with public holidays.
    pub holiday_calc: bool,
    /// Name of the public holiday, usually a single space otherwise.
    pub description: String,
    /// `None` when the portal sent an unknown day-of-week code.
    pub weekday: Option<Weekday>,
}

impl CalendarDay {
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Some(Weekday::Sat | Weekday::Sun))
    }

    pub fn kind_label(&self) -> &'static str {
        if self.workday { "workday" } else { "holiday" }
    }
}

/// Portal day-of-week code: "1" is Monday, "7" is Sunday.
pub fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code.trim() {
        "1" => Some(Weekday::Mon),
        "2" => Some(Weekday::Tue),
        "3" => Some(Weekday::Wed),
        "4" => Some(Weekday::Thu),
        "5" => Some(Weekday::Fri),
        "6" => Some(Weekday::Sat),
        "7" => Some(Weekday::Sun),
        _ => None,
    }
}
