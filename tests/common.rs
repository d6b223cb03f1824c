#![allow(dead_code)]
//! A fake HR Flow portal on localhost: the login redirect chain, the
//! landing page and the JSON endpoints, recording every request it gets.

use assert_cmd::{Command, cargo_bin_cmd};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub const USERNAME: &str = "jane.doe@example.com";
pub const PASSWORD: &str = "hunter2";
pub const XSRF_TOKEN: &str = "xsrf-0123456789abcdef";
pub const ROLE_KEY: &str = "1234_EMPLOYEE";
pub const SESSION_COOKIE: &str = "KirjaamoSession=s3ss10n";

/// Path prefix the fake portal serves under, like the real one.
pub const BASE_PATH: &str = "/KirjaamoWeb";

pub fn hrflow() -> Command {
    cargo_bin_cmd!("hrflow")
}

/// One request as the fake portal saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path and query.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body decoded as `application/x-www-form-urlencoded`.
    pub fn form(&self) -> HashMap<String, String> {
        self.body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (decode(k), decode(v)))
            .collect()
    }

    pub fn form_json(&self, field: &str) -> serde_json::Value {
        let form = self.form();
        let raw = form.get(field).expect("form field present");
        serde_json::from_str(raw).expect("form field is JSON")
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s).expect("url decode").into_owned()
}

/// A canned answer: status code, content type and body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.into(),
        }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "application/json; charset=utf-8",
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

pub struct FakePortal {
    pub port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakePortal {
    /// A portal where everything works.
    pub fn start() -> Self {
        Self::with_overrides(Vec::new())
    }

    /// Same, with the replies of some paths replaced. Paths are matched
    /// without their query string.
    pub fn with_overrides(overrides: Vec<(&str, Reply)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake portal");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("fake portal port");

        let overrides: HashMap<String, Reply> = overrides
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let recorded = Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.to_string(), h.value.as_str().to_string()))
                        .collect(),
                    body,
                };

                let reply = overrides
                    .get(recorded.path())
                    .cloned()
                    .unwrap_or_else(|| default_reply(port, &recorded));
                recorder.lock().expect("recorder lock").push(recorded);

                let mut response = tiny_http::Response::from_string(reply.body)
                    .with_status_code(reply.status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", reply.content_type)
                            .expect("header"),
                    );
                if request.url().starts_with(&format!("{BASE_PATH}/login/Employee")) {
                    response = response.with_header(
                        tiny_http::Header::from_bytes(
                            "Set-Cookie",
                            format!("{SESSION_COOKIE}; Path=/"),
                        )
                        .expect("header"),
                    );
                }
                let _ = request.respond(response);
            }
        });

        Self { port, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, BASE_PATH)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("recorder lock").clone()
    }

    /// Requests to `path` (relative to the portal base), oldest first.
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        let full = format!("{BASE_PATH}{path}");
        self.requests()
            .into_iter()
            .filter(|r| r.path() == full)
            .collect()
    }

    /// The first request to `path`; panics if there was none.
    pub fn first_request_to(&self, path: &str) -> Recorded {
        self.requests_to(path)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("no request to {path}"))
    }
}

fn default_reply(port: u16, req: &Recorded) -> Reply {
    let path = req.path();
    match path.strip_prefix(BASE_PATH).unwrap_or(path) {
        "/login/Employee" => Reply::html(login_page()),
        "/adfs/ls/" => {
            let form = req.form();
            let ok = form.get("UserName").map(String::as_str) == Some(USERNAME)
                && form.get("Password").map(String::as_str) == Some(PASSWORD);
            if ok {
                Reply::html(provider_form_page(port))
            } else {
                Reply::html("<html><body><p>Incorrect user ID or password.</p></body></html>")
            }
        }
        "/signin-wsfed" => Reply::html(relay_form_page()),
        "/signin-complete" => Reply::html(landing_page()),
        "/calendar/GetCalendar" => Reply::json(CALENDAR_JSON),
        "/employee/GetAbsences" => Reply::json(ABSENCES_JSON),
        "/employee/GetDailyWorkAmount" => Reply::json(WORK_AMOUNT_JSON),
        "/employee/NewWorkLogRow" => Reply::json(r#"{"actionSuccessful":true}"#),
        _ => Reply::status(404),
    }
}

/// Login page: the credential form posts to the identity provider, with an
/// HTML-escaped query in its action.
pub fn login_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html><body>
<div class="login">
<form id="options" method="post" action="{BASE_PATH}/adfs/ls/?client-request-id=abc&amp;wa=wsignin1.0">
<input id="userNameInput" name="UserName" type="email" value="" />
<input id="passwordInput" name="Password" type="password" value="" />
</form>
</div>
</body></html>"#
    )
}

/// First provider hop: an absolute action.
pub fn provider_form_page(port: u16) -> String {
    format!(
        r#"<html><head><title>Working...</title></head><body>
<form method="POST" name="hiddenform" action="http://127.0.0.1:{port}{BASE_PATH}/signin-wsfed">
<input type="hidden" name="wa" value="wsignin1.0" />
<input type="hidden" name="wresult" value="&lt;t:RequestSecurityTokenResponse/&gt;" />
<input type="hidden" name="wctx" value="rm=0&amp;id=passive" />
<noscript><p>Script is disabled. Click Submit to continue.</p></noscript>
</form>
<script language="javascript">window.setTimeout('document.forms[0].submit()', 0);</script>
</body></html>"#
    )
}

/// Second hop: a relative action.
pub fn relay_form_page() -> String {
    r#"<html><body onload="document.forms[0].submit()">
<form method="post" action="signin-complete">
<input type="hidden" name="code" value="relay-code" />
<input type="hidden" name="state" value="relay-state" />
</form>
</body></html>"#
        .to_string()
}

pub fn landing_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head>
<script type="text/javascript">
    var RequestVerificationToken = '{XSRF_TOKEN}';
    var SELECTED_USER_AND_ROLEKEY = "{ROLE_KEY}";
    var employments = [{{"isPassive":false,"isDefaultEmployment":true,"employmentId":5511,"personId":4242,"name":"Doe Jane","groupId":77,"groupName":"Engineering","customerId":1,"userName":"{USERNAME}","startDate":"2019-01-01T00:00:00","endDate":null,"orgUnit":"R&D"}}];
</script>
</head><body><div id="app"></div></body></html>"#
    )
}

pub const CALENDAR_JSON: &str = r#"[
  {"id":2,"date":"2020-04-13T00:00:00","workDay":false,"holiday":true,"description":"Easter Monday","weekDay":"1","tes":"","dateType":""},
  {"id":1,"date":"2020-04-10T00:00:00","workDay":false,"holiday":true,"description":"Good Friday","weekDay":"5","tes":"","dateType":""},
  {"id":3,"date":"2020-04-14T00:00:00","workDay":true,"holiday":true,"description":" ","weekDay":"2","tes":"","dateType":""},
  {"id":4,"date":"2020-04-11T00:00:00","workDay":false,"holiday":false,"description":" ","weekDay":"6","tes":"","dateType":""}
]"#;

pub const ABSENCES_JSON: &str = r#"{"absencesInfos":[
  {"id":"a-1","startDate":"2020-08-03T00:00:00","employmentId":5511,"personId":4242,"absenceInfoText":"03.08.2020 - 11.08.2020 Annual leave"},
  {"id":"a-2","startDate":"2020-09-14T00:00:00","employmentId":5511,"personId":4242,"absenceInfoText":"14.09.2020 - 14.09.2020 Sick leave"}
]}"#;

pub const WORK_AMOUNT_JSON: &str = r#"{"dailyWorkAmountList":[
  {"date":"2020-08-12T00:00:00","hours":7.5,"hoursCount":1,"lunchBreak":30,"nextStartTime":"2020-08-13T08:00:00"},
  {"date":"2020-08-13T00:00:00","hours":8.25,"hoursCount":2,"lunchBreak":0,"nextStartTime":null}
]}"#;

/// A temp dir holding a config file pointing at `base_url`.
pub fn write_config(base_url: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("hrflow.yaml");
    let yaml = format!(
        "username: {USERNAME}\npassword: {PASSWORD}\nbase_url: {base_url}\ndaily_hours: 7.5\nworker: monthly\n"
    );
    fs::write(&path, yaml).expect("write config");
    (dir, path)
}
