//! HTTP exchange with the theme backend.
//!
//! The manager never talks to the network directly; it hands a [`Request`]
//! to a [`Transport`] and interprets the [`Response`]. The browser uses
//! `fetch` (see [`crate::web`]); [`MemoryTransport`] replays scripted
//! replies for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::trace;

use crate::descriptor::ThemeDescriptor;

/// HTTP method of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    /// A bodiless GET.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST with a JSON body.
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body.into()),
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a header, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (network down, CORS, aborted).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Performs one HTTP exchange.
///
/// Futures are not required to be `Send`; the browser host is
/// single-threaded.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends `request` and resolves with the response, whatever its status.
    ///
    /// # Errors
    /// Returns `TransportError` only when no response was received.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// JSON envelope returned by both theme endpoints.
///
/// `theme` stays raw so a malformed echo cannot mask the `success` flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub success: bool,
    pub theme: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl ApiResponse {
    /// Decodes the `theme` payload; `null` or absent is `None`.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the payload is not a descriptor.
    pub fn decode_theme(&self) -> Result<Option<ThemeDescriptor>, serde_json::Error> {
        match &self.theme {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => ThemeDescriptor::deserialize(value).map(Some),
        }
    }
}

/// [`Transport`] that replays queued replies and records requests.
///
/// ```rust
/// use themeroot::transport::MemoryTransport;
///
/// let transport = MemoryTransport::new()
///     .reply(200, r#"{"success": true}"#)
///     .fail("offline");
/// assert!(transport.requests().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryTransport {
    replies: RefCell<VecDeque<Result<Response, TransportError>>>,
    requests: RefCell<Vec<Request>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.push_reply(status, body);
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::new(message)));
        self
    }

    /// Queues a response on a shared transport.
    pub fn push_reply(&self, status: u16, body: impl Into<String>) {
        self.replies
            .borrow_mut()
            .push_back(Ok(Response::new(status, body)));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        trace!(http.method = %request.method, http.url = %request.url, "Memory transport send");
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no reply queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_sets_content_type() {
        let request = Request::post_json("/api/theme/save/", "{}").header("X-CSRFToken", "t");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.header_value("x-csrftoken"), Some("t"));
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_response_status_classes() {
        assert!(Response::new(200, "").is_success());
        assert!(Response::new(204, "").is_success());
        assert!(!Response::new(302, "").is_success());
        assert!(!Response::new(500, "").is_success());
    }

    #[test]
    fn test_api_response_null_theme() {
        let api: ApiResponse = serde_json::from_str(r#"{"success": true, "theme": null}"#).unwrap();
        assert!(api.success);
        assert_eq!(api.theme, None);
        assert!(matches!(api.decode_theme(), Ok(None)));
    }

    #[test]
    fn test_api_response_decodes_theme_on_demand() {
        let api: ApiResponse =
            serde_json::from_str(r##"{"success": true, "theme": {"primaryColor": "#010203"}}"##)
                .unwrap();
        let theme = api.decode_theme().unwrap().unwrap();
        assert_eq!(theme.primary_color.as_deref(), Some("#010203"));

        let bad: ApiResponse =
            serde_json::from_str(r#"{"success": true, "theme": {"primaryColor": 5}}"#).unwrap();
        assert!(bad.success);
        assert!(bad.decode_theme().is_err());
    }

    #[test]
    fn test_api_response_missing_success_is_false() {
        let api: ApiResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(!api.success);
        assert_eq!(api.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_memory_transport_replays_in_order() {
        let transport = MemoryTransport::new().reply(200, "a").fail("offline");
        let first = transport.send(Request::get("/one")).await.unwrap();
        assert_eq!(first.body, "a");
        let second = transport.send(Request::get("/two")).await;
        assert_eq!(second, Err(TransportError::new("offline")));
        let third = transport.send(Request::get("/three")).await;
        assert!(third.is_err());
        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["/one", "/two", "/three"]);
    }
}
