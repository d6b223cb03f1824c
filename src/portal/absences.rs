use crate::errors::{AppError, AppResult};
use crate::models::absence::Absence;
use crate::models::employment::Employment;
use crate::portal::session::envelope;
use crate::portal::wire::WorkLogFilter;
use crate::portal::{Session, decode_json};
use chrono::NaiveDate;
use serde::Deserialize;

const OPERATION: &str = "getting absences";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbsenceResponse {
    #[serde(default)]
    absences_infos: Option<Vec<AbsenceInfo>>,
    #[serde(default)]
    error: Option<String>,
}

/// `startDate`, `employmentId` and `personId` also come along, but only the
/// text carries the full range.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AbsenceInfo {
    id: String,
    /// e.g. "03.08.2020 - 11.08.2020 Annual leave"
    absence_info_text: String,
}

impl Session {
    /// Absences of `employments` overlapping `[start, end]`.
    pub fn absences(
        &self,
        employments: &[Employment],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Absence>> {
        let filter = WorkLogFilter::new(employments, start, end);
        let params = [("workLogRequest", envelope(OPERATION, &filter)?)];

        // An Accept header makes this endpoint double-encode its JSON.
        let body =
            self.post_form_without_accept(OPERATION, &self.endpoints().absences(), &params)?;
        let response: AbsenceResponse = decode_json(OPERATION, &body)?;

        if let Some(message) = response.error {
            return Err(AppError::RemoteBusinessError {
                operation: OPERATION,
                message,
            });
        }

        response
            .absences_infos
            .unwrap_or_default()
            .iter()
            .map(|info| Absence::from_info_text(&info.id, &info.absence_info_text))
            .collect()
    }
}
