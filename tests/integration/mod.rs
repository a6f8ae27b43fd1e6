//! Shared helpers for the integration scenarios.

pub mod concurrency_test;
pub mod end_to_end_test;

use repeater_history::models::{HttpMethod, HttpRequest, HttpResponse, HttpService};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Builds a request the way the host would report it, with a Host header.
pub fn request(host: &str, port: u16, method: HttpMethod, path: &str) -> HttpRequest {
    let mut request = HttpRequest::new(HttpService::new(host, port, port == 443), method, path);
    request.add_header("Host", host);
    request
}

/// Builds a small text response.
pub fn response(status_code: u16, status_text: &str, body: &str) -> HttpResponse {
    let mut response = HttpResponse::new(status_code, status_text);
    response.add_header("Content-Type", "text/plain");
    response.set_body(body);
    response
}
