//! Unified application error type.
//! All modules (portal, core, cli, config, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::portal::form::FormError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Handshake
    // ---------------------------
    #[error("{step}: portal page no longer matches the expected structure ({detail})")]
    ProtocolMismatch { step: &'static str, detail: String },

    #[error("{step}: {source}")]
    Form {
        step: &'static str,
        #[source]
        source: FormError,
    },

    #[error("token extraction failed: {0}")]
    TokenExtractionFailed(String),

    // ---------------------------
    // Transport / remote
    // ---------------------------
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: connection failed: {source}")]
    Connection {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{operation}: http status error {status}")]
    RemoteError {
        operation: &'static str,
        status: String,
    },

    #[error("{operation}: hrflow error: {message}")]
    RemoteBusinessError {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: decoding response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: encoding request: {source}")]
    Encode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ---------------------------
    // Domain
    // ---------------------------
    #[error("absence text does not match '<start> - <end> <description>': {0:?}")]
    AbsenceFormatMismatch(String),

    #[error("no employment found, cannot log hours")]
    NoEmployment,

    #[error("backend returned unsuccessful status for the new work log")]
    SubmissionRejected,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Can't find config file at {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),
}

pub type AppResult<T> = Result<T, AppError>;
