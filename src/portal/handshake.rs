//! Login sequence.
//!
//! The portal's login is a forms authentication followed by an identity
//! provider redirect chain, none of which is documented. The only stable
//! contract is that every intermediate page carries an auto-submitting form,
//! so the handshake just resubmits whatever form it gets, a fixed number of
//! times, until it reaches the landing page with the session tokens:
//!
//! 1. `start`: GET the login page, find the credential form URL
//! 2. `credentials`: POST username and password
//! 3. `identity redirect 1`: resubmit the provider's form
//! 4. `identity redirect 2`: resubmit the next form, reaching the portal
//! 5. `token extraction`: pull token, role key and employments from scripts
//!
//! Cookies set along the way are kept by the HTTP client and end up in the
//! returned [`Session`].

use crate::errors::{AppError, AppResult};
use crate::models::employment::Employment;
use crate::portal::form::extract_form;
use crate::portal::{Accept, Credentials, Portal, Session, check_status, form_headers, read_text};
use regex::Regex;
use reqwest::Url;
use reqwest::blocking::Response;
use reqwest::header::HeaderValue;
use std::sync::LazyLock;
use tracing::{debug, info};

const STEP_START: &str = "start";
const STEP_CREDENTIALS: &str = "credentials";
const STEP_REDIRECT_1: &str = "identity redirect 1";
const STEP_REDIRECT_2: &str = "identity redirect 2";

const AUTH_METHOD: &str = "FormsAuthentication";

static LOGIN_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id="options"[^>]*action="([^"]*)""#).expect("static regex"));
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var RequestVerificationToken = '([^']*)'").expect("static regex")
});
static ROLE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var SELECTED_USER_AND_ROLEKEY = "([^"]*)";"#).expect("static regex")
});
static EMPLOYMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var employments = (\[.*\])").expect("static regex"));

/// A fetched page and the URL it was finally served from, after redirects.
struct Page {
    url: Url,
    body: String,
}

/// What the landing page hands over once logged in.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTokens {
    pub xsrf_token: String,
    pub user_role_key: String,
    pub employments: Vec<Employment>,
}

pub struct Handshake<'a> {
    portal: Portal,
    credentials: &'a Credentials,
}

impl<'a> Handshake<'a> {
    pub fn new(portal: Portal, credentials: &'a Credentials) -> Self {
        Self {
            portal,
            credentials,
        }
    }

    pub fn run(self) -> AppResult<Session> {
        let login_url = self.start()?;
        let provider_page = self.submit_credentials(login_url)?;
        let redirect_page = self.follow_identity_redirect(STEP_REDIRECT_1, &provider_page)?;
        let landing_page = self.follow_identity_redirect(STEP_REDIRECT_2, &redirect_page)?;

        let tokens = extract_session_tokens(&landing_page.body)?;
        let xsrf_token = HeaderValue::from_str(&tokens.xsrf_token).map_err(|_| {
            AppError::TokenExtractionFailed("RequestVerificationToken is not a valid header value".into())
        })?;

        info!(
            employments = tokens.employments.len(),
            "authenticated to {}",
            self.portal.endpoints.base()
        );

        Ok(Session::new(
            self.portal,
            self.credentials.username.clone(),
            xsrf_token,
            tokens.user_role_key,
            tokens.employments,
        ))
    }

    /// GET the login page and find where the credentials go.
    fn start(&self) -> AppResult<Url> {
        let url = self.portal.endpoints.login();
        debug!(step = STEP_START, %url, "fetching login page");

        let resp = self
            .portal
            .http
            .get(&url)
            .send()
            .map_err(|source| AppError::Transport {
                operation: STEP_START,
                source,
            })?;
        let page = read_page(STEP_START, resp)?;

        let action = extract_login_url(&page.body)?;
        resolve_url(STEP_START, &page.url, &action)
    }

    /// POST the credentials. Answers with the identity provider's first form.
    fn submit_credentials(&self, login_url: Url) -> AppResult<Page> {
        debug!(step = STEP_CREDENTIALS, url = %login_url, "submitting credentials");

        let params = [
            ("UserName", self.credentials.username.as_str()),
            ("Password", self.credentials.password.as_str()),
            ("AuthMethod", AUTH_METHOD),
        ];

        let resp = self
            .portal
            .http
            .post(login_url)
            .form(&params)
            .headers(form_headers(None, Accept::Unset))
            .send()
            .map_err(|source| AppError::Transport {
                operation: STEP_CREDENTIALS,
                source,
            })?;

        read_page(STEP_CREDENTIALS, resp)
    }

    /// Resubmit the first form of `page` unchanged.
    fn follow_identity_redirect(&self, step: &'static str, page: &Page) -> AppResult<Page> {
        let form = extract_form(&page.body).map_err(|source| AppError::Form { step, source })?;
        let target = resolve_url(step, &page.url, &form.action)?;

        debug!(step, url = %target, fields = form.fields.len(), "following identity redirect");

        let resp = self
            .portal
            .http
            .post(target)
            .form(form.fields.as_pairs())
            .headers(form_headers(None, Accept::Unset))
            .send()
            .map_err(|source| AppError::Transport {
                operation: step,
                source,
            })?;

        read_page(step, resp)
    }
}

fn read_page(step: &'static str, resp: Response) -> AppResult<Page> {
    let resp = check_status(step, resp)?;
    let url = resp.url().clone();
    let body = read_text(step, resp)?;
    Ok(Page { url, body })
}

/// Resolves a form action against the page it was found on.
pub fn resolve_url(step: &'static str, page_url: &Url, action: &str) -> AppResult<Url> {
    page_url
        .join(action)
        .map_err(|e| AppError::ProtocolMismatch {
            step,
            detail: format!("invalid form action {:?}: {}", action, e),
        })
}

/// The credential form's URL: the `action` of the element with id `options`.
pub fn extract_login_url(body: &str) -> AppResult<String> {
    LOGIN_URL_RE
        .captures(body)
        .map(|caps| caps[1].replace("&amp;", "&"))
        .ok_or_else(|| AppError::ProtocolMismatch {
            step: STEP_START,
            detail: "no element with id \"options\" and an action attribute".into(),
        })
}

pub fn extract_request_verification_token(body: &str) -> AppResult<String> {
    TOKEN_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::TokenExtractionFailed("RequestVerificationToken not found".into()))
}

pub fn extract_user_role_key(body: &str) -> AppResult<String> {
    ROLE_KEY_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| AppError::TokenExtractionFailed("SELECTED_USER_AND_ROLEKEY not found".into()))
}

pub fn extract_employments(body: &str) -> AppResult<Vec<Employment>> {
    let caps = EMPLOYMENTS_RE
        .captures(body)
        .ok_or_else(|| AppError::TokenExtractionFailed("employments not found".into()))?;

    serde_json::from_str(&caps[1])
        .map_err(|e| AppError::TokenExtractionFailed(format!("parsing employments: {}", e)))
}

/// Runs the three landing page extractions. Any of them failing is fatal.
pub fn extract_session_tokens(body: &str) -> AppResult<SessionTokens> {
    Ok(SessionTokens {
        xsrf_token: extract_request_verification_token(body)?,
        user_role_key: extract_user_role_key(body)?,
        employments: extract_employments(body)?,
    })
}
