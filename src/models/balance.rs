use chrono::NaiveDate;

/// Needed vs. recorded hours over a range of calendar days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balance {
    pub needed_hours: f64,
    pub actual_hours: f64,
    /// Workdays with neither an absence nor recorded hours.
    pub missing_days: Vec<NaiveDate>,
}

impl Balance {
    /// Positive when more hours were recorded than needed.
    pub fn surplus_hours(&self) -> f64 {
        self.actual_hours - self.needed_hours
    }
}
