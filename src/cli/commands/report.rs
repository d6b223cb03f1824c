use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::work_log::{WorkLogEntry, WorkerKind};
use crate::ui::messages::success;
use crate::utils::date::{parse_day_month, to_portal_date, today};
use crate::utils::time::{hours2readable, parse_duration, parse_optional_time};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Submit one work log to the portal.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        duration,
        start,
        end,
        date,
        project,
        comment,
        hourly,
        no_lunch,
    } = cmd
    {
        let kind = if *hourly { WorkerKind::Hourly } else { cfg.worker };

        let day = match date {
            Some(d) => parse_day_month(d, today().year())?,
            None => today(),
        };

        let start = parse_optional_time(start.as_ref())?;
        let end = parse_optional_time(end.as_ref())?;
        let duration = parse_duration(duration)?;
        let (start, end) = resolve_span(day, start, end, duration, now_time())?;

        let mut entry = WorkLogEntry::new(start, end, kind);
        entry.comment = comment.clone();
        entry.project = project.clone().or_else(|| cfg.default_project.clone());
        if *no_lunch {
            entry.include_lunch = false;
        }

        let session = connect(cfg)?;
        session.new_work_log(&entry)?;

        success(format!(
            "Reported {} on {} ({} - {})",
            hours2readable(entry.hours()),
            to_portal_date(day),
            entry.start.format("%H:%M"),
            entry.end.format("%H:%M"),
        ));
    }
    Ok(())
}

fn now_time() -> NaiveTime {
    let now = chrono::Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Start and end of the reported span on `day`.
///
/// End defaults to `now` and start to end minus `duration`, so the
/// duration only matters when no start is given.
pub fn resolve_span(
    day: NaiveDate,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    duration: TimeDelta,
    now: NaiveTime,
) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let end = day.and_time(end.unwrap_or(now));
    let start = match start {
        Some(s) => day.and_time(s),
        None => end
            .checked_sub_signed(duration)
            .ok_or_else(|| AppError::InvalidDuration(format!("{}m", duration.num_minutes())))?,
    };

    if end <= start {
        return Err(AppError::InvalidTime(format!(
            "end {} is not after start {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        )));
    }
    if start.date() != day || end.date() != day {
        return Err(AppError::InvalidTime(format!(
            "{} - {} doesn't fit in {}",
            start.format("%H:%M"),
            end.format("%H:%M"),
            to_portal_date(day)
        )));
    }

    Ok((start, end))
}
