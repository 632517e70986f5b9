//! Blocking HTTP client used for schema and update calls.
//!
//! Any status whose code does not start with `2` is turned into
//! [`LoaderError::RemoteService`], carrying the method, URL, status and the error body
//! (pretty-printed when it is JSON).

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

use crate::error::{LoaderError, LoaderResult};

const JSON_CONTENT_TYPE: &str = "application/json";
const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Thin wrapper around a blocking [`reqwest`] client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Build a client whose connect and read timeouts are both `timeout`.
    pub fn new(timeout: Duration) -> LoaderResult<Self> {
        let inner = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { inner })
    }

    /// Send a JSON request and parse the JSON response.
    ///
    /// Returns `None` for `204 No Content` and for an empty body.
    pub fn json_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&T>,
    ) -> LoaderResult<Option<Value>> {
        let mut req = self
            .inner
            .request(method.clone(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = check_status(&method, url, req.send()?)?;
        if resp.status().as_u16() == 204 {
            return Ok(None);
        }
        let text = resp.text()?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// POST an XML message, stripped of control characters, and return the raw response body.
    pub fn post_markup(&self, url: &str, message: &str) -> LoaderResult<String> {
        let resp = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(sanitize(message))
            .send()?;
        let resp = check_status(&Method::POST, url, resp)?;
        Ok(resp.text()?)
    }
}

/// Remove control characters that XML 1.0 does not allow (tab, LF and CR are kept).
pub fn sanitize(message: &str) -> String {
    message.chars().filter(|c| !is_forbidden_control(*c)).collect()
}

fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}

fn check_status(method: &Method, url: &str, resp: Response) -> LoaderResult<Response> {
    let status = resp.status();
    if status.as_str().starts_with('2') {
        return Ok(resp);
    }

    let raw = resp.text().unwrap_or_default();
    Err(LoaderError::RemoteService {
        method: method.to_string(),
        url: url.to_string(),
        status: status.as_u16(),
        body: describe_error_body(&raw),
    })
}

/// Pretty-print an error body if it is JSON, otherwise return it unchanged.
pub fn describe_error_body(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| raw.to_string())
}
