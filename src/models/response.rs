//! HTTP response data models.
//!
//! This module defines the captured representation of an inbound HTTP response:
//! status line, ordered headers and the raw body.

use super::request::DEFAULT_HTTP_VERSION;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inbound HTTP response as observed by the capture hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP version from the status line, e.g. "HTTP/1.1".
    pub http_version: String,

    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Reason phrase (e.g., "OK", "Not Found"). May be empty.
    pub status_text: String,

    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,

    /// Response body as raw bytes.
    ///
    /// Kept as bytes so binary responses survive capture untouched.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            http_version: DEFAULT_HTTP_VERSION.to_string(),
            status_code,
            status_text: status_text.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header, keeping any existing header with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Returns the first header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response status indicates a redirection (3xx).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Status line without the trailing CRLF, e.g. "HTTP/1.1 200 OK".
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            format!("{} {}", self.http_version, self.status_code)
        } else {
            format!(
                "{} {} {}",
                self.http_version, self.status_code, self.status_text
            )
        }
    }
}

/// Renders the response in its wire form.
impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n", self.status_line())?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        write!(f, "\r\n")?;
        write!(f, "{}", String::from_utf8_lossy(&self.body))
    }
}
