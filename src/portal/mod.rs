//! HR Flow portal client.
//!
//! The portal has no public API. Everything goes through the login forms of
//! its identity provider and the JSON endpoints of its own web frontend:
//! - `form`: first-form extraction used at every login hop
//! - `handshake`: the login sequence producing a [`Session`]
//! - `session`: the authenticated session and the request plumbing
//! - `calendar`, `absences`, `work_amount`, `work_log`: domain operations

pub mod absences;
pub mod calendar;
pub mod form;
pub mod handshake;
mod raw;
pub mod session;
pub mod wire;
pub mod work_amount;
pub mod work_log;

use crate::errors::{AppError, AppResult};
use raw::RawClient;
use reqwest::blocking::{Client, Response};
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

pub use session::Session;

pub const DEFAULT_BASE_URL: &str = "https://hrflow.accountor.fi/KirjaamoWeb";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const JSON: &str = "application/json";

/// Anti-forgery header. `HeaderName::from_static` wants it lowercase.
pub const XSRF_TOKEN_HEADER: &str = "x-xsrf-token";

/// Username and password from the config file.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Fixed portal endpoints, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> String {
        format!("{}/login/Employee", self.base)
    }

    pub fn calendar(&self) -> String {
        format!("{}/calendar/GetCalendar", self.base)
    }

    pub fn absences(&self) -> String {
        format!("{}/employee/GetAbsences", self.base)
    }

    pub fn daily_work_amount(&self) -> String {
        format!("{}/employee/GetDailyWorkAmount", self.base)
    }

    pub fn new_work_log_row(&self) -> String {
        format!("{}/employee/NewWorkLogRow", self.base)
    }
}

/// Whether a request announces `Accept: application/json`.
///
/// Some endpoints answer with a different body depending on it: the
/// calendar needs it to return JSON at all, while the absence and work
/// amount endpoints double-encode their JSON when any `Accept` is present.
/// Those two go through [`raw::RawClient`], since reqwest fills in
/// `Accept: */*` for every request that has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Json,
    Unset,
}

/// The unauthenticated half of the client: two HTTP clients sharing one
/// cookie jar, and where to find the portal. Consumed by the login handshake.
pub struct Portal {
    http: Client,
    raw: RawClient,
    endpoints: Endpoints,
}

impl Portal {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let cookies = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|source| AppError::Transport {
                operation: "building http client",
                source,
            })?;

        Ok(Self {
            http,
            raw: RawClient::new(cookies)?,
            endpoints: Endpoints::new(base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Runs the login handshake. On success the returned session owns the
    /// cookie store filled along the way.
    pub fn authenticate(self, credentials: &Credentials) -> AppResult<Session> {
        handshake::Handshake::new(self, credentials).run()
    }
}

/// Headers for a form-encoded request, optionally carrying the
/// anti-forgery token.
pub(crate) fn form_headers(token: Option<&HeaderValue>, accept: Accept) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    if let Some(t) = token {
        headers.insert(HeaderName::from_static(XSRF_TOKEN_HEADER), t.clone());
    }
    if accept == Accept::Json {
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    }
    headers
}

/// Fails with [`AppError::RemoteError`] on any status from 300 up.
pub(crate) fn check_status(operation: &'static str, resp: Response) -> AppResult<Response> {
    let status = resp.status();
    if status.as_u16() >= 300 {
        return Err(AppError::RemoteError {
            operation,
            status: status.to_string(),
        });
    }
    Ok(resp)
}

pub(crate) fn read_text(operation: &'static str, resp: Response) -> AppResult<String> {
    resp.text()
        .map_err(|source| AppError::Transport { operation, source })
}

pub(crate) fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    resp: Response,
) -> AppResult<T> {
    let body = read_text(operation, resp)?;
    decode_json(operation, &body)
}

pub(crate) fn decode_json<T: DeserializeOwned>(operation: &'static str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|source| AppError::Decode { operation, source })
}
