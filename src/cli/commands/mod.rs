pub mod absences;
pub mod balance;
pub mod calendar;
pub mod config;
pub mod hours;
pub mod init;
pub mod report;

use crate::config::Config;
use crate::errors::AppResult;
use crate::portal::{Portal, Session};

/// Log in with the configured credentials.
pub(crate) fn connect(cfg: &Config) -> AppResult<Session> {
    Portal::new(&cfg.base_url)?.authenticate(&cfg.credentials())
}
