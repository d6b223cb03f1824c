//! Work log submission.
//!
//! The portal's form posts a whole timesheet row plus the state of its own
//! listing view. Most of the row is bookkeeping the backend requires but
//! ignores; those fields are fixed literals below.

use crate::errors::{AppError, AppResult};
use crate::models::employment::Employment;
use crate::models::work_log::WorkLogEntry;
use crate::portal::session::envelope;
use crate::portal::wire::WorkLogStatus;
use crate::portal::{Accept, Session, read_json};
use crate::utils::date::{PORTAL_LOG_TIMESTAMP_FORMAT, to_portal_date};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

const OPERATION: &str = "creating work log";

/// The UI action the backend expects alongside a new row: plain "Save".
pub const SAVE_ACTION: &str =
    r#"{"Action":"T","ActionId":1999,"Receiver":null,"Label":"Save","SelectedReceiver":null,"Comment":""}"#;

const LUNCH_BREAK_MINUTES: i64 = 30;

/// Dimension lists a row links to, with their column numbers.
const DEPARTMENTS: (i64, &str) = (7, "OSASTOT");
const COST_CENTERS: (i64, &str) = (8, "KUSTPAIKAT");
const PROJECTS: (i64, &str) = (9, "PROJEKTIT");

fn log_timestamp(t: NaiveDateTime) -> String {
    t.format(PORTAL_LOG_TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogRow {
    pub id: i64,
    pub customer_id: i64,
    pub employment_id: i64,
    pub person_id: i64,
    pub group_id: i64,
    pub version_id: i64,
    /// Midnight of the reported day, e.g. "2020-02-25 00:00:00.000".
    pub date: String,
    pub main_salary_factor_id: i64,
    /// Hours with three decimals, e.g. "7.500".
    pub main_amount: String,
    pub main_unit: &'static str,
    pub work_log_factors: Vec<WorkLogFactor>,
    pub start_time: String,
    pub end_time: String,
    pub salary_group_value: &'static str,
    pub status: WorkLogStatus,
    pub created: String,
    pub last_modifier_person_id: i64,
    #[serde(rename = "lastModifierUser_Id")]
    pub last_modifier_user_id: i64,
    pub last_modifier_display_name: String,
    pub modified_by: String,
    /// Minutes.
    pub lunch_break: i64,
    /// "Y" or "N": whether the lunch break is cut from the amount.
    pub cut_lunch_from_amount: &'static str,
    /// The comment field of the web form.
    pub entry_text: String,
    pub entry_text_type: &'static str,
    pub work_log_row_links: Vec<WorkLogRowLink>,
    pub work_log_comments: Vec<String>,
    pub source_id: Option<String>,
    pub bunch_id: Option<String>,
    pub external_id: Option<String>,
    pub created_from_source: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogFactor {
    pub id: i64,
    pub work_log_row_id: i64,
    pub factor_id: i64,
    pub amount: f64,
    pub unit: &'static str,
    pub created: String,
    pub creator: String,
    pub modified_by: String,
    pub modified: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogRowLink {
    pub id: i64,
    pub work_log_row_id: i64,
    pub col_number: i64,
    pub col_control_type: &'static str,
    pub dimension_link_type: &'static str,
    pub dimension_source_type: &'static str,
    pub list_id: &'static str,
    pub input_id: Option<String>,
    pub value: Option<String>,
    pub label: Option<String>,
}

impl WorkLogRowLink {
    fn new((col_number, list_id): (i64, &'static str), selected: Option<&str>) -> Self {
        Self {
            id: 0,
            work_log_row_id: 0,
            col_number,
            col_control_type: "SELECT",
            dimension_link_type: "LIST",
            dimension_source_type: "PARAM",
            list_id,
            input_id: None,
            // the value is the leading token of the label, e.g. "1234" of "1234 Tools"
            value: selected.and_then(|s| s.split(' ').next()).map(str::to_string),
            label: selected.map(str::to_string),
        }
    }
}

impl WorkLogRow {
    /// Builds the row for `entry` on `employment`, stamped with `now`.
    pub fn build(
        employment: &Employment,
        username: &str,
        entry: &WorkLogEntry,
        now: NaiveDateTime,
    ) -> Self {
        let now = log_timestamp(now);
        let unit = entry.kind.main_unit();
        let (lunch_break, cut_lunch) = if entry.include_lunch {
            (LUNCH_BREAK_MINUTES, "Y")
        } else {
            (0, "N")
        };

        let factor = WorkLogFactor {
            id: 0,
            work_log_row_id: 0,
            factor_id: 1,
            amount: entry.hours(),
            unit,
            created: now.clone(),
            creator: username.to_string(),
            modified_by: username.to_string(),
            modified: now.clone(),
        };

        Self {
            id: 0,
            customer_id: 1,
            employment_id: employment.employment_id,
            person_id: employment.person_id,
            group_id: employment.group_id,
            version_id: 3,
            date: log_timestamp(entry.start.date().and_time(chrono::NaiveTime::MIN)),
            main_salary_factor_id: 1,
            main_amount: entry.main_amount(),
            main_unit: unit,
            work_log_factors: vec![factor],
            start_time: log_timestamp(entry.start),
            end_time: log_timestamp(entry.end),
            salary_group_value: entry.kind.salary_group_code(),
            status: WorkLogStatus::New,
            created: now,
            last_modifier_person_id: 0,
            last_modifier_user_id: 0,
            last_modifier_display_name: String::new(),
            modified_by: username.to_string(),
            lunch_break,
            cut_lunch_from_amount: cut_lunch,
            entry_text: entry.comment.clone(),
            entry_text_type: "TEXTHASHTAG",
            work_log_row_links: vec![
                WorkLogRowLink::new(DEPARTMENTS, None),
                WorkLogRowLink::new(COST_CENTERS, None),
                WorkLogRowLink::new(PROJECTS, entry.project.as_deref()),
            ],
            work_log_comments: Vec::new(),
            source_id: None,
            bunch_id: None,
            external_id: None,
            created_from_source: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// State of the portal's listing view, posted along with a new row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogRequest<'a> {
    pub is_fixed_process: bool,
    pub get_lists_labels: bool,
    pub get_all: bool,
    pub is_set_start_and_end_date_from_copy_dates: bool,
    pub is_update_row: bool,
    pub view_name: &'static str,
    pub lang: &'static str,
    pub employments: &'a [Employment],
    pub start_date: String,
    pub end_date: String,
    pub status_list: &'static [WorkLogStatus],
    pub search_date_type: &'static str,
    pub email_receiver: String,
    pub email_changes_text: &'static str,
}

impl<'a> WorkLogRequest<'a> {
    pub fn new(employments: &'a [Employment], username: &str, now: NaiveDateTime) -> Self {
        let today = to_portal_date(now.date());
        Self {
            is_fixed_process: true,
            get_lists_labels: false,
            get_all: true,
            is_set_start_and_end_date_from_copy_dates: false,
            is_update_row: false,
            view_name: "employee",
            lang: "2",
            employments,
            start_date: today.clone(),
            end_date: today,
            status_list: &[WorkLogStatus::New],
            search_date_type: "DATE",
            email_receiver: username.to_string(),
            email_changes_text: "Save",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NewWorkLogResponse {
    action_successful: bool,
}

impl Session {
    /// Submits one work log on the first employment of the session.
    pub fn new_work_log(&self, entry: &WorkLogEntry) -> AppResult<()> {
        let employment = self.employments().first().ok_or(AppError::NoEmployment)?;
        let now = chrono::Local::now().naive_local();

        let row = WorkLogRow::build(employment, self.username(), entry, now);
        let request = WorkLogRequest::new(self.employments(), self.username(), now);

        let params = [
            ("workLogRow", envelope(OPERATION, &row)?),
            ("workLogRequest", envelope(OPERATION, &request)?),
            ("action", SAVE_ACTION.to_string()),
            ("copyToDates", "[]".to_string()),
        ];

        let resp = self.post_form(
            OPERATION,
            &self.endpoints().new_work_log_row(),
            &params,
            Accept::Json,
        )?;
        let response: NewWorkLogResponse = read_json(OPERATION, resp)?;

        if !response.action_successful {
            return Err(AppError::SubmissionRejected);
        }

        info!(amount = %row.main_amount, date = %row.date, "work log created");
        Ok(())
    }
}
