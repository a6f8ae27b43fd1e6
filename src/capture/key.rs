//! Destination grouping keys.
//!
//! Captured traffic is grouped by the service it was sent to. The key is
//! `"{host}:{port}"`; scheme, method, path and body play no part, so two
//! requests to the same host and port always land in the same group.

use crate::models::HttpRequest;

/// Derives the grouping key for a request.
///
/// An empty host is not special-cased and yields `":{port}"`.
///
/// # Examples
///
/// ```
/// use repeater_history::capture::derive_key;
/// use repeater_history::models::{HttpMethod, HttpRequest, HttpService};
///
/// let request = HttpRequest::new(
///     HttpService::new("example.com", 443, true),
///     HttpMethod::GET,
///     "/login",
/// );
/// assert_eq!(derive_key(&request), "example.com:443");
/// ```
pub fn derive_key(request: &HttpRequest) -> String {
    format!("{}:{}", request.service.host, request.service.port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, HttpService};
    use proptest::prelude::*;

    fn request(host: &str, port: u16, secure: bool, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(HttpService::new(host, port, secure), method, path)
    }

    #[test]
    fn test_key_format() {
        let r = request("other.com", 80, false, HttpMethod::POST, "/submit");
        assert_eq!(derive_key(&r), "other.com:80");
    }

    #[test]
    fn test_empty_host() {
        let r = request("", 8080, false, HttpMethod::GET, "/");
        assert_eq!(derive_key(&r), ":8080");
    }

    #[test]
    fn test_scheme_does_not_split_groups() {
        let plain = request("example.com", 8443, false, HttpMethod::GET, "/");
        let tls = request("example.com", 8443, true, HttpMethod::GET, "/");
        assert_eq!(derive_key(&plain), derive_key(&tls));
    }

    fn method_strategy() -> impl Strategy<Value = HttpMethod> {
        prop_oneof![
            Just(HttpMethod::GET),
            Just(HttpMethod::POST),
            Just(HttpMethod::PUT),
            Just(HttpMethod::DELETE),
            Just(HttpMethod::PATCH),
            Just(HttpMethod::OPTIONS),
            Just(HttpMethod::HEAD),
        ]
    }

    proptest! {
        #[test]
        fn same_host_and_port_share_a_key(
            host in "[a-z0-9.-]{0,30}",
            port in any::<u16>(),
            m1 in method_strategy(),
            m2 in method_strategy(),
            p1 in "/[a-zA-Z0-9/?=&]{0,40}",
            p2 in "/[a-zA-Z0-9/?=&]{0,40}",
            b1 in proptest::collection::vec(any::<u8>(), 0..64),
            b2 in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut r1 = request(&host, port, false, m1, &p1);
            r1.set_body(b1);
            let mut r2 = request(&host, port, true, m2, &p2);
            r2.set_body(b2);
            r2.add_header("X-Extra", "1");

            prop_assert_eq!(derive_key(&r1), derive_key(&r2));
        }

        #[test]
        fn different_ports_get_different_keys(
            host in "[a-z0-9.-]{1,30}",
            a in any::<u16>(),
            b in any::<u16>(),
        ) {
            prop_assume!(a != b);
            let r1 = request(&host, a, false, HttpMethod::GET, "/");
            let r2 = request(&host, b, false, HttpMethod::GET, "/");
            prop_assert_ne!(derive_key(&r1), derive_key(&r2));
        }
    }
}
