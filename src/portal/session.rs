use crate::errors::{AppError, AppResult};
use crate::models::employment::Employment;
use crate::portal::{Accept, Endpoints, Portal, check_status, form_headers};
use reqwest::blocking::Response;
use reqwest::header::HeaderValue;
use serde::Serialize;
use tracing::debug;

/// An authenticated portal session.
///
/// Only a successful [`Portal::authenticate`] creates one, so the
/// anti-forgery token is always there. Nothing in it changes afterwards; the
/// cookie jar shared by both HTTP clients is the only state that moves, and
/// only the transports touch it. Meant for one sequential caller.
pub struct Session {
    portal: Portal,
    username: String,
    xsrf_token: HeaderValue,
    user_role_key: String,
    employments: Vec<Employment>,
}

impl Session {
    pub(crate) fn new(
        portal: Portal,
        username: String,
        xsrf_token: HeaderValue,
        user_role_key: String,
        employments: Vec<Employment>,
    ) -> Self {
        Self {
            portal,
            username,
            xsrf_token,
            user_role_key,
            employments,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn xsrf_token(&self) -> &str {
        self.xsrf_token.to_str().unwrap_or_default()
    }

    pub fn user_role_key(&self) -> &str {
        &self.user_role_key
    }

    pub fn employments(&self) -> &[Employment] {
        &self.employments
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.portal.endpoints
    }

    /// GET with form-encoded `params` in the body.
    pub(crate) fn get_form(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, String)],
        accept: Accept,
    ) -> AppResult<Response> {
        debug!(operation, %url, "GET");
        let resp = self
            .portal
            .http
            .get(url)
            .form(params)
            .headers(form_headers(Some(&self.xsrf_token), accept))
            .send()
            .map_err(|source| AppError::Transport { operation, source })?;
        check_status(operation, resp)
    }

    /// POST form-encoded `params`.
    pub(crate) fn post_form(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, String)],
        accept: Accept,
    ) -> AppResult<Response> {
        debug!(operation, %url, fields = params.len(), "POST");
        let resp = self
            .portal
            .http
            .post(url)
            .form(params)
            .headers(form_headers(Some(&self.xsrf_token), accept))
            .send()
            .map_err(|source| AppError::Transport { operation, source })?;
        check_status(operation, resp)
    }

    /// POST form-encoded `params` with no `Accept` header at all, returning
    /// the response text.
    pub(crate) fn post_form_without_accept(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, String)],
    ) -> AppResult<String> {
        // Building without sending keeps reqwest's default headers out.
        let request = self
            .portal
            .http
            .post(url)
            .form(params)
            .headers(form_headers(Some(&self.xsrf_token), Accept::Unset))
            .build()
            .map_err(|source| AppError::Transport { operation, source })?;
        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .unwrap_or_default()
            .to_vec();
        self.portal
            .raw
            .post(operation, request.url(), request.headers().clone(), body)
    }
}

/// Serializes a payload to the JSON string that goes inside a form field.
pub(crate) fn envelope<T: Serialize>(operation: &'static str, payload: &T) -> AppResult<String> {
    serde_json::to_string(payload).map_err(|source| AppError::Encode { operation, source })
}
