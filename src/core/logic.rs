use crate::core::calculator::balance;
use crate::errors::{AppError, AppResult};
use crate::models::balance::Balance;
use crate::portal::session::Session;
use crate::utils::date;
use chrono::NaiveDate;
use tracing::debug;

pub struct Core;

impl Core {
    /// Fetches calendar, absences and recorded hours for `[start, end]` and
    /// computes the balance over them.
    pub fn build_balance(
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
        daily_hours: f64,
    ) -> AppResult<Balance> {
        if start > end {
            return Err(AppError::InvalidPeriod(format!("{} is after {}", start, end)));
        }

        let calendar = session.calendar(start, end)?;
        let absences = session.absences(session.employments(), start, end)?;
        let work_amounts = session.daily_work_amount(session.employments(), start, end)?;

        debug!(
            days = calendar.len(),
            absences = absences.len(),
            work_amounts = work_amounts.len(),
            "computing balance"
        );

        Ok(balance::calculate_balance(
            &calendar,
            &absences,
            &work_amounts,
            daily_hours,
        ))
    }

    /// Balance over the last `months` months up to today.
    pub fn balance_for_months(
        session: &Session,
        months: u32,
        daily_hours: f64,
    ) -> AppResult<Balance> {
        let end = date::today();
        let start = date::months_before(end, months)?;
        Self::build_balance(session, start, end, daily_hours)
    }
}
