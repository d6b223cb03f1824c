use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// How the worker is paid. Decides the salary group, the unit reported to
/// the portal and whether the lunch break is cut from the amount by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorkerKind {
    #[default]
    Monthly,
    Hourly,
}

impl WorkerKind {
    pub fn salary_group_code(&self) -> &'static str {
        match self {
            WorkerKind::Monthly => "99002",
            WorkerKind::Hourly => "11000",
        }
    }

    pub fn main_unit(&self) -> &'static str {
        match self {
            WorkerKind::Monthly => "DURATION",
            WorkerKind::Hourly => "HOURS",
        }
    }

    /// Monthly workers get the 30 minute lunch deducted unless told otherwise.
    pub fn includes_lunch_by_default(&self) -> bool {
        matches!(self, WorkerKind::Monthly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerKind::Monthly => "monthly",
            WorkerKind::Hourly => "hourly",
        }
    }
}

/// A work log the user wants to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkLogEntry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: WorkerKind,
    pub comment: String,
    /// Project label as shown in the portal, e.g. `"1234 Internal tools"`.
    pub project: Option<String>,
    pub include_lunch: bool,
}

impl WorkLogEntry {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, kind: WorkerKind) -> Self {
        Self {
            start,
            end,
            kind,
            comment: String::new(),
            project: None,
            include_lunch: kind.includes_lunch_by_default(),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    /// Amount as the portal wants it: hours with three decimals.
    pub fn main_amount(&self) -> String {
        format!("{:.3}", self.hours())
    }
}
