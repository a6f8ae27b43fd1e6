//! Data models for captured traffic.
//!
//! These are the captured forms of the traffic the host hands to the capture
//! hook. Requests and responses render back to their wire text through
//! `Display`.

pub mod request;
pub mod response;
pub mod tool;

pub use request::{HttpMethod, HttpRequest, HttpService, DEFAULT_HTTP_VERSION};
pub use response::HttpResponse;
pub use tool::ToolType;
