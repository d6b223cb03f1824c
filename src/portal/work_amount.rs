use crate::errors::{AppError, AppResult};
use crate::models::employment::Employment;
use crate::models::work_amount::WorkAmount;
use crate::portal::session::envelope;
use crate::portal::wire::{WorkLogFilter, json_duration, json_timestamp};
use crate::portal::{Session, decode_json};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Deserialize;

const OPERATION: &str = "getting daily work amount";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkAmountResponse {
    #[serde(default)]
    daily_work_amount_list: Option<Vec<HrWorkAmount>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HrWorkAmount {
    #[serde(with = "json_timestamp")]
    date: NaiveDateTime,
    #[serde(default, deserialize_with = "json_duration::hours")]
    hours: TimeDelta,
    #[serde(default)]
    hours_count: i64,
    #[serde(default, deserialize_with = "json_duration::minutes")]
    lunch_break: TimeDelta,
    #[serde(default, deserialize_with = "json_timestamp::deserialize_opt")]
    next_start_time: Option<NaiveDateTime>,
}

impl From<HrWorkAmount> for WorkAmount {
    fn from(raw: HrWorkAmount) -> Self {
        WorkAmount {
            date: raw.date.date(),
            amount: raw.hours,
            entry_count: raw.hours_count,
            lunch_break: raw.lunch_break,
            next_start_time: raw.next_start_time,
        }
    }
}

impl Session {
    /// Hours recorded per day for `employments` in `[start, end]`.
    pub fn daily_work_amount(
        &self,
        employments: &[Employment],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WorkAmount>> {
        let filter = WorkLogFilter::new(employments, start, end);
        let params = [("workLogRequest", envelope(OPERATION, &filter)?)];

        // Same double-encoding quirk as the absences: no Accept header.
        let body = self.post_form_without_accept(
            OPERATION,
            &self.endpoints().daily_work_amount(),
            &params,
        )?;
        let response: WorkAmountResponse = decode_json(OPERATION, &body)?;

        if let Some(message) = response.error {
            return Err(AppError::RemoteBusinessError {
                operation: OPERATION,
                message,
            });
        }

        Ok(response
            .daily_work_amount_list
            .unwrap_or_default()
            .into_iter()
            .map(WorkAmount::from)
            .collect())
    }
}
