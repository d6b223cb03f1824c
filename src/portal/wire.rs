//! Shapes and formats the portal's JSON endpoints speak.

use crate::models::employment::Employment;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Work log statuses as the portal names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkLogStatus {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "SENT")]
    Sent,
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(rename = "TRANSFERRED")]
    Transferred,
    #[serde(rename = "WAITINGAPPROVAL")]
    WaitingApproval,
}

impl WorkLogStatus {
    /// Every status a listing should include.
    pub const ALL: [WorkLogStatus; 5] = [
        WorkLogStatus::New,
        WorkLogStatus::Sent,
        WorkLogStatus::Rejected,
        WorkLogStatus::Transferred,
        WorkLogStatus::WaitingApproval,
    ];
}

/// Language code the listing endpoints insist on. 2 is English.
pub const LANG_ENGLISH: i64 = 2;

/// Filter sent as the `workLogRequest` form field by the absence and daily
/// work amount listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogFilter<'a> {
    pub lang: i64,
    pub employments: &'a [Employment],
    #[serde(serialize_with = "portal_date")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "portal_date")]
    pub end_date: NaiveDate,
    pub status_list: &'static [WorkLogStatus],
    pub search_date_type: &'static str,
    pub get_all: bool,
}

impl<'a> WorkLogFilter<'a> {
    pub fn new(employments: &'a [Employment], start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            lang: LANG_ENGLISH,
            employments,
            start_date,
            end_date,
            status_list: &WorkLogStatus::ALL,
            search_date_type: "DATE",
            get_all: true,
        }
    }
}

fn portal_date<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&crate::utils::date::to_portal_date(*d))
}

/// Deserializers for the portal's `yyyy-MM-ddTHH:mm:ss` timestamps.
pub mod json_timestamp {
    use crate::utils::date::PORTAL_JSON_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, de::Error};

    fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        // the portal sometimes appends fractional seconds
        NaiveDateTime::parse_from_str(s, &format!("{PORTAL_JSON_TIMESTAMP_FORMAT}%.f"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).map_err(D::Error::custom)
    }

    /// Missing, null and empty values all read as `None`.
    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) if !s.trim().is_empty() => parse(&s).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Deserializers for the durations the work amount listing sends as plain
/// numbers. Values a `TimeDelta` cannot hold are decode errors.
pub mod json_duration {
    use crate::models::work_amount::hours_to_duration;
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, de::Error};

    /// Fractional hours, e.g. `7.5`.
    pub fn hours<'de, D: Deserializer<'de>>(d: D) -> Result<TimeDelta, D::Error> {
        let h = f64::deserialize(d)?;
        hours_to_duration(h).ok_or_else(|| D::Error::custom(format!("hours out of range: {h}")))
    }

    pub fn minutes<'de, D: Deserializer<'de>>(d: D) -> Result<TimeDelta, D::Error> {
        let m = i64::deserialize(d)?;
        TimeDelta::try_minutes(m)
            .ok_or_else(|| D::Error::custom(format!("minutes out of range: {m}")))
    }
}
