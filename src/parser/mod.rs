//! Raw HTTP message parser.
//!
//! Hosts hand traffic over either as structured messages or as the raw bytes
//! that went over the wire. This module turns the raw form into the
//! `HttpRequest`/`HttpResponse` models: start line, headers, then everything
//! after the first blank line as the body. Both CRLF and bare LF line endings
//! are accepted.

pub mod error;

use crate::models::{HttpMethod, HttpRequest, HttpResponse, HttpService};
pub use error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// `METHOD TARGET VERSION`, each a single whitespace-free token.
static REQUEST_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)$").expect("Failed to compile request line regex")
});

static HTTP_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^HTTP/\d+(?:\.\d+)?$").expect("Failed to compile HTTP version regex")
});

/// Parses a raw request sent to `service`.
///
/// # Arguments
///
/// * `service` - Destination the request was sent to (not part of the wire text)
/// * `raw` - The request bytes: request line, headers, blank line, body
///
/// # Examples
///
/// ```
/// use repeater_history::models::{HttpMethod, HttpService};
/// use repeater_history::parser::parse_raw_request;
///
/// let service = HttpService::new("example.com", 80, false);
/// let raw = b"GET /users HTTP/1.1\r\nHost: example.com\r\n\r\n";
///
/// let request = parse_raw_request(service, raw).unwrap();
/// assert_eq!(request.method, HttpMethod::GET);
/// assert_eq!(request.path, "/users");
/// assert_eq!(request.header("host"), Some("example.com"));
/// ```
pub fn parse_raw_request(service: HttpService, raw: &[u8]) -> Result<HttpRequest, ParseError> {
    let (head, body) = split_head_body(raw);
    let head = String::from_utf8_lossy(head);
    let mut lines = head_lines(&head);

    let request_line = lines.next().ok_or(ParseError::EmptyMessage)?;
    let (method, target, version) = parse_request_line(request_line)?;

    let mut request = HttpRequest::new(service, method, target);
    request.http_version = version.to_string();
    request.headers = parse_headers(lines)?;
    request.body = body.to_vec();

    Ok(request)
}

/// Parses a raw response.
///
/// # Examples
///
/// ```
/// use repeater_history::parser::parse_raw_response;
///
/// let response = parse_raw_response(b"HTTP/1.1 404 Not Found\r\n\r\nmissing").unwrap();
/// assert_eq!(response.status_code, 404);
/// assert_eq!(response.status_text, "Not Found");
/// assert_eq!(response.body, b"missing");
/// ```
pub fn parse_raw_response(raw: &[u8]) -> Result<HttpResponse, ParseError> {
    let (head, body) = split_head_body(raw);
    let head = String::from_utf8_lossy(head);
    let mut lines = head_lines(&head);

    let status_line = lines.next().ok_or(ParseError::EmptyMessage)?;
    let (version, status_code, status_text) = parse_status_line(status_line)?;

    let mut response = HttpResponse::new(status_code, status_text);
    response.http_version = version.to_string();
    response.headers = parse_headers(lines)?;
    response.body = body.to_vec();

    Ok(response)
}

/// Builds a service identity from an absolute `http`/`https` URL.
///
/// The port falls back to the scheme default (80 or 443) when the URL does
/// not carry one.
pub fn parse_service(url: &str) -> Result<HttpService, ParseError> {
    let invalid = |reason: String| ParseError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;

    let secure = match parsed.scheme() {
        "https" => true,
        "http" => false,
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    };

    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;

    let port = parsed
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port".to_string()))?;

    Ok(HttpService::new(host, port, secure))
}

/// Splits a raw message at the first empty line, whichever line ending it
/// uses.
///
/// A message with no blank line is all head and has an empty body.
fn split_head_body(raw: &[u8]) -> (&[u8], &[u8]) {
    let crlf = find(raw, b"\r\n\r\n").map(|pos| (pos, 4));
    let lf = find(raw, b"\n\n").map(|pos| (pos, 2));

    let separator = match (crlf, lf) {
        (Some(crlf), Some(lf)) => Some(if lf.0 < crlf.0 { lf } else { crlf }),
        (crlf, lf) => crlf.or(lf),
    };

    match separator {
        Some((pos, len)) => (&raw[..pos], &raw[pos + len..]),
        None => (raw, &[]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Lines of the message head with line terminators removed, skipping any
/// empty lines before the start line.
fn head_lines(head: &str) -> impl Iterator<Item = &str> {
    head.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .skip_while(|line| line.trim().is_empty())
}

fn parse_request_line(line: &str) -> Result<(HttpMethod, &str, &str), ParseError> {
    let captures = REQUEST_LINE_REGEX
        .captures(line.trim())
        .ok_or_else(|| ParseError::InvalidRequestLine {
            line: line.to_string(),
        })?;
    let token = |i: usize| captures.get(i).map_or("", |m| m.as_str());
    let (method, target, version) = (token(1), token(2), token(3));

    let method = HttpMethod::from_token(method).ok_or_else(|| ParseError::InvalidMethod {
        method: method.to_string(),
    })?;
    validate_http_version(version)?;

    Ok((method, target, version))
}

fn parse_status_line(line: &str) -> Result<(&str, u16, &str), ParseError> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let code = parts.next().ok_or_else(|| ParseError::InvalidStatusLine {
        line: line.to_string(),
    })?;
    let reason = parts.next().unwrap_or_default().trim();

    validate_http_version(version)?;

    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidStatusCode {
            code: code.to_string(),
        });
    }
    let status_code = code.parse().map_err(|_| ParseError::InvalidStatusCode {
        code: code.to_string(),
    })?;

    Ok((version, status_code, reason))
}

fn validate_http_version(version: &str) -> Result<(), ParseError> {
    if HTTP_VERSION_REGEX.is_match(version) {
        Ok(())
    } else {
        Err(ParseError::InvalidHttpVersion {
            version: version.to_string(),
        })
    }
}

fn parse_headers<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> Result<Vec<(String, String)>, ParseError> {
    let mut headers = Vec::new();

    // Line 1 is the start line.
    for (idx, line) in lines.enumerate() {
        let invalid = || ParseError::InvalidHeader {
            header: line.to_string(),
            line: idx + 2,
        };

        let (name, value) = line.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        headers.push((name.to_string(), value.trim().to_string()));
    }

    Ok(headers)
}
