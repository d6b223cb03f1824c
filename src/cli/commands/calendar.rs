use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_day};
use crate::utils::date;
use crate::utils::formatting::weekday_name;
use chrono::{Days, NaiveDate};

/// `today` and the day `count` days later.
pub fn calendar_range(today: NaiveDate, count: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let end = today
        .checked_add_days(Days::new(u64::from(count)))
        .ok_or_else(|| AppError::InvalidDate(format!("{} + {} days", today, count)))?;
    Ok((today, end))
}

/// Print today and the next `count` days of the work calendar.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { count, all } = cmd {
        let (today, end) = calendar_range(date::today(), *count)?;
        let session = connect(cfg)?;

        let days = session.calendar(today, end)?;

        for day in days.iter().filter(|d| *all || !d.is_weekend()) {
            let color = color_for_day(day.workday, day.is_weekend());
            let description = day.description.trim();
            println!(
                "{:<10} {} {}{}{}{}",
                weekday_name(day.weekday),
                day.date.format("%d.%m.%Y"),
                color,
                day.kind_label(),
                RESET,
                if description.is_empty() {
                    String::new()
                } else {
                    format!("  {}", description)
                }
            );
        }
    }
    Ok(())
}
