//! A second, bare HTTP path.
//!
//! reqwest adds `Accept: */*` to every request that carries no `Accept`
//! header, and offers no way to turn that off. The endpoints that must see
//! no `Accept` at all are sent through hyper directly instead. Cookies come
//! from and go back to the jar the reqwest client uses, so both paths share
//! one session.

use crate::errors::{AppError, AppResult};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::Request;
use hyper::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

const BUILD_OPERATION: &str = "building http client";

fn connection(
    operation: &'static str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> AppError {
    AppError::Connection {
        operation,
        source: source.into(),
    }
}

/// Sends exactly the headers it is given, plus `Host`, `Content-Length`
/// and the cookies stored for the URL.
pub(crate) struct RawClient {
    runtime: Runtime,
    http: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    cookies: Arc<Jar>,
}

impl RawClient {
    pub(crate) fn new(cookies: Arc<Jar>) -> AppResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| connection(BUILD_OPERATION, e))?;

        let tls = native_tls::TlsConnector::new().map_err(|e| connection(BUILD_OPERATION, e))?;
        let mut tcp = HttpConnector::new();
        tcp.enforce_http(false);
        let connector = HttpsConnector::from((tcp, tokio_native_tls::TlsConnector::from(tls)));
        let http = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            runtime,
            http,
            cookies,
        })
    }

    /// POST `body` to `url` and return the response text. Statuses from 300
    /// up fail with [`AppError::RemoteError`].
    pub(crate) fn post(
        &self,
        operation: &'static str,
        url: &Url,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> AppResult<String> {
        debug!(operation, %url, "POST (bare)");
        let mut req = Request::post(url.as_str())
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| connection(operation, e))?;
        *req.headers_mut() = headers;
        if let Some(cookie) = self.cookies.cookies(url) {
            req.headers_mut().insert(COOKIE, cookie);
        }

        let (status, set_cookies, body) = self.runtime.block_on(async {
            let resp = self
                .http
                .request(req)
                .await
                .map_err(|e| connection(operation, e))?;
            let status = resp.status();
            let set_cookies: Vec<HeaderValue> =
                resp.headers().get_all(SET_COOKIE).iter().cloned().collect();
            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| connection(operation, e))?
                .to_bytes();
            Ok::<_, AppError>((status, set_cookies, body))
        })?;

        self.cookies.set_cookies(&mut set_cookies.iter(), url);

        if status.as_u16() >= 300 {
            return Err(AppError::RemoteError {
                operation,
                status: status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
