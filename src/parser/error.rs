//! Error types for raw HTTP message parsing.
//!
//! This module defines the errors that can occur while turning raw wire bytes
//! handed over by the host into request and response models.

use std::fmt;

/// Errors that can occur while parsing a raw HTTP message.
///
/// Each variant carries the offending text so the log line is enough to see
/// what the host actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The message contained no start line.
    EmptyMessage,

    /// The request line did not have the form `METHOD TARGET VERSION`.
    InvalidRequestLine {
        /// The request line that was encountered
        line: String,
    },

    /// Invalid or unsupported HTTP method.
    InvalidMethod {
        /// The invalid method token that was encountered
        method: String,
    },

    /// The status line did not have the form `VERSION CODE [REASON]`.
    InvalidStatusLine {
        /// The status line that was encountered
        line: String,
    },

    /// The status code was not a three-digit number.
    InvalidStatusCode {
        /// The status code token that was encountered
        code: String,
    },

    /// Invalid HTTP version format.
    ///
    /// HTTP version must be in the format "HTTP/x.x" or "HTTP/x".
    InvalidHttpVersion {
        /// The invalid version string
        version: String,
    },

    /// Header line without a `:` separator or with an empty name.
    InvalidHeader {
        /// The invalid header line that was encountered
        header: String,
        /// Line number within the message head (1-based)
        line: usize,
    },

    /// The URL used to describe the target service could not be used.
    InvalidUrl {
        /// The URL that was rejected
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyMessage => write!(f, "Empty HTTP message"),
            ParseError::InvalidRequestLine { line } => write!(
                f,
                "Invalid request line '{}'. Expected format: 'METHOD TARGET HTTP/VERSION'",
                line
            ),
            ParseError::InvalidMethod { method } => write!(
                f,
                "Invalid HTTP method '{}'. Expected one of: GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD, TRACE, CONNECT",
                method
            ),
            ParseError::InvalidStatusLine { line } => write!(
                f,
                "Invalid status line '{}'. Expected format: 'HTTP/VERSION CODE [REASON]'",
                line
            ),
            ParseError::InvalidStatusCode { code } => {
                write!(f, "Invalid status code '{}'", code)
            }
            ParseError::InvalidHttpVersion { version } => write!(
                f,
                "Invalid HTTP version '{}'. Expected format: 'HTTP/1.1' or 'HTTP/2'",
                version
            ),
            ParseError::InvalidHeader { header, line } => write!(
                f,
                "Invalid header format '{}' at line {}. Expected format: 'Header-Name: value'",
                header, line
            ),
            ParseError::InvalidUrl { url, reason } => {
                write!(f, "Invalid URL '{}': {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ParseError {}
