use crate::errors::{AppError, AppResult};
use crate::utils::date::{PORTAL_DATE_FORMAT, days_between};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static ABSENCE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+) - (\S+)\s*(.*?)\s*$").expect("static regex"));

/// An absence (vacation, sick leave, ...) with an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Absence {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Pretty much the type of the absence, e.g. "Annual leave".
    pub info: String,
}

impl Absence {
    /// Builds an absence from the portal's combined text,
    /// e.g. `"03.08.2020 - 11.08.2020 Annual leave"`.
    pub fn from_info_text(id: &str, text: &str) -> AppResult<Self> {
        let caps = ABSENCE_TEXT_RE
            .captures(text)
            .ok_or_else(|| AppError::AbsenceFormatMismatch(text.to_string()))?;

        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, PORTAL_DATE_FORMAT)
                .map_err(|_| AppError::AbsenceFormatMismatch(text.to_string()))
        };

        Ok(Self {
            id: id.to_string(),
            start_date: parse(&caps[1])?,
            end_date: parse(&caps[2])?,
            info: caps[3].to_string(),
        })
    }

    /// Every date covered by the absence, both ends included.
    pub fn days(&self) -> Vec<NaiveDate> {
        days_in_absence(self)
    }
}

pub fn days_in_absence(absence: &Absence) -> Vec<NaiveDate> {
    days_between(absence.start_date, absence.end_date)
}
