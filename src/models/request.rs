//! HTTP request data models.
//!
//! This module defines the captured representation of an outbound HTTP request:
//! the target service, the request line, ordered headers and the raw body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default HTTP version used when a request does not specify one.
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a method token from a request line.
    ///
    /// Method tokens are case-sensitive on the wire, but hosts occasionally
    /// hand over lowercase tokens, so matching is case-insensitive.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a known HTTP method, `None` otherwise.
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The network destination a request was sent to.
///
/// Only `host` and `port` take part in grouping; `secure` is kept so the
/// captured record still says whether the exchange went over TLS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpService {
    /// Target host name or IP literal, as the host reported it.
    pub host: String,

    /// Target TCP port.
    pub port: u16,

    /// Whether the connection used TLS.
    pub secure: bool,
}

impl HttpService {
    /// Creates a new service identity.
    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Self {
        Self {
            host: host.into(),
            port,
            secure,
        }
    }
}

impl fmt::Display for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "https" } else { "http" };
        write!(f, "{}://{}:{}", scheme, self.host, self.port)
    }
}

/// An outbound HTTP request as observed by the capture hook.
///
/// Headers are kept as an ordered list so the wire representation is
/// reproduced exactly, including duplicate header names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Destination the request was sent to.
    pub service: HttpService,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Request target as it appears on the request line (path and query).
    pub path: String,

    /// HTTP version from the request line, e.g. "HTTP/1.1".
    pub http_version: String,

    /// Request headers in wire order.
    pub headers: Vec<(String, String)>,

    /// Raw request body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Creates a new HttpRequest with no headers and an empty body.
    ///
    /// # Arguments
    ///
    /// * `service` - Destination of the request
    /// * `method` - HTTP method
    /// * `path` - Request target (path and query)
    pub fn new(service: HttpService, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            http_version: DEFAULT_HTTP_VERSION.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header, keeping any existing header with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Sets the request body.
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

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Target host of the request.
    pub fn host(&self) -> &str {
        &self.service.host
    }

    /// Target port of the request.
    pub fn port(&self) -> u16 {
        self.service.port
    }
}

/// Renders the request in its wire form: request line, CRLF-terminated
/// headers, a blank line and the body (lossily decoded as UTF-8).
impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.path, self.http_version)?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        write!(f, "\r\n")?;
        write!(f, "{}", String::from_utf8_lossy(&self.body))
    }
}
