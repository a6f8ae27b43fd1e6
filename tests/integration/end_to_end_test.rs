//! End-to-end scenarios: traffic in through the hook, reports out through
//! the copy actions.

use super::{init_test_env, request, response};
use repeater_history::actions::{
    ActionContext, ActionOutcome, CopyScope, LogNotices, MemoryClipboard, Trigger,
};
use repeater_history::config::HistoryCopyConfig;
use repeater_history::extension::HistoryCopyExtension;
use repeater_history::models::{HttpMethod, HttpService, ToolType};
use repeater_history::parser::{parse_raw_request, parse_raw_response};
use std::sync::Arc;

fn extension() -> (HistoryCopyExtension, Arc<MemoryClipboard>) {
    init_test_env();
    let clipboard = Arc::new(MemoryClipboard::new());
    let extension = HistoryCopyExtension::new(
        HistoryCopyConfig::default(),
        clipboard.clone(),
        Arc::new(LogNotices),
    );
    (extension, clipboard)
}

fn open(host: &str, port: u16) -> ActionContext {
    ActionContext::with_selection(Some(request(host, port, HttpMethod::GET, "/open")), None)
}

#[test]
fn test_tab_history_per_destination() {
    let (extension, clipboard) = extension();
    let hook = extension.hook();

    for (i, method) in [HttpMethod::GET, HttpMethod::POST, HttpMethod::PUT]
        .into_iter()
        .enumerate()
    {
        let req = request("example.com", 443, method, &format!("/step/{}", i + 1));
        hook.on_request_to_be_sent(&req, ToolType::Repeater);
        let outcome =
            hook.on_exchange_complete(&req, &response(200, "OK", "done"), ToolType::Repeater);
        assert!(outcome.is_captured());
    }
    let other = request("other.com", 80, HttpMethod::GET, "/");
    hook.on_exchange_complete(&other, &response(404, "Not Found", ""), ToolType::Repeater);

    // example.com:443
    let outcome = extension.handle(Trigger::CopyTabHistory, &open("example.com", 443));
    assert_eq!(
        outcome,
        ActionOutcome::Copied {
            scope: CopyScope::Tab("example.com:443".to_string()),
            entries: 3
        }
    );
    let report = clipboard.contents().unwrap();
    assert!(report.starts_with("BURP REPEATER TAB HISTORY\n"));
    assert!(report.contains("Tab: example.com:443\n"));
    assert!(report.contains("Total Entries: 3\n"));
    for n in 1..=3 {
        assert!(report.contains(&format!("REQUEST #{}\n", n)));
        assert!(report.contains(&format!("RESPONSE #{}\n", n)));
    }
    assert!(!report.contains("REQUEST #4"));
    // Entries keep capture order
    let first = report.find("GET /step/1 HTTP/1.1").unwrap();
    let second = report.find("POST /step/2 HTTP/1.1").unwrap();
    let third = report.find("PUT /step/3 HTTP/1.1").unwrap();
    assert!(first < second && second < third);

    // other.com:80
    let outcome = extension.handle(Trigger::CopyTabHistory, &open("other.com", 80));
    assert_eq!(
        outcome,
        ActionOutcome::Copied {
            scope: CopyScope::Tab("other.com:80".to_string()),
            entries: 1
        }
    );
    let report = clipboard.contents().unwrap();
    assert!(report.contains("Tab: other.com:80\nTotal Entries: 1\n"));
    assert!(report.contains("HTTP/1.1 404 Not Found"));
}

#[test]
fn test_empty_history_leaves_clipboard_unmodified() {
    let (extension, clipboard) = extension();

    let outcome = extension.handle(Trigger::CopyTabHistory, &open("example.com", 443));

    assert_eq!(
        outcome,
        ActionOutcome::EmptyHistory {
            key: Some("example.com:443".to_string())
        }
    );
    assert_eq!(clipboard.contents(), None);
}

#[test]
fn test_non_qualifying_sources_are_not_captured() {
    let (extension, clipboard) = extension();
    let req = request("example.com", 443, HttpMethod::GET, "/");

    for tool in [ToolType::Proxy, ToolType::Scanner, ToolType::Intruder] {
        extension
            .hook()
            .on_exchange_complete(&req, &response(200, "OK", ""), tool);
    }

    assert_eq!(extension.store().entry_count("example.com:443"), 0);
    assert!(extension.store().is_empty());
    assert!(!extension
        .handle(Trigger::CopyTabHistory, &open("example.com", 443))
        .is_success());
    assert_eq!(clipboard.contents(), None);
}

#[test]
fn test_grouping_ignores_scheme_path_and_method() {
    let (extension, _) = extension();
    let hook = extension.hook();

    let mut tls = request("example.com", 8443, HttpMethod::GET, "/a");
    tls.service = HttpService::new("example.com", 8443, true);
    let mut plain = request("example.com", 8443, HttpMethod::DELETE, "/b/c?d=e");
    plain.service = HttpService::new("example.com", 8443, false);

    hook.on_exchange_complete(&tls, &response(200, "OK", ""), ToolType::Repeater);
    hook.on_exchange_complete(&plain, &response(204, "No Content", ""), ToolType::Repeater);

    assert_eq!(extension.store().tab_count(), 1);
    assert_eq!(extension.store().entry_count("example.com:8443"), 2);
}

#[test]
fn test_copy_current_and_all_history() {
    let (extension, clipboard) = extension();
    let hook = extension.hook();

    hook.on_exchange_complete(
        &request("a.com", 80, HttpMethod::GET, "/"),
        &response(200, "OK", "a"),
        ToolType::Repeater,
    );
    hook.on_exchange_complete(
        &request("b.com", 443, HttpMethod::GET, "/"),
        &response(200, "OK", "b"),
        ToolType::Repeater,
    );

    let context = ActionContext::with_selection(
        Some(request("c.com", 80, HttpMethod::GET, "/unsent")),
        None,
    );
    assert!(extension.handle(Trigger::CopyCurrent, &context).is_success());
    let current = clipboard.contents().unwrap();
    assert!(current.starts_with("CURRENT REQUEST/RESPONSE\n"));
    assert!(current.contains("GET /unsent HTTP/1.1"));
    assert!(current.contains("[No response data]"));

    let outcome = extension.handle(Trigger::CopyAllHistory, &ActionContext::empty());
    assert_eq!(
        outcome,
        ActionOutcome::Copied {
            scope: CopyScope::All,
            entries: 2
        }
    );
    let all = clipboard.contents().unwrap();
    assert!(all.starts_with("BURP REPEATER HISTORY\n"));
    assert!(all.contains("Total Entries: 2\n"));
    assert!(all.contains("Host: a.com") && all.contains("Host: b.com"));
}

#[test]
fn test_raw_traffic_is_reproduced_verbatim() {
    let (extension, clipboard) = extension();
    let service = HttpService::new("api.example.com", 443, true);

    let raw_request = "POST /v1/login HTTP/1.1\r\nHost: api.example.com\r\nContent-Type: application/json\r\n\r\n{\"user\":\"admin\",\"pass\":\"x\"}";
    let raw_response = "HTTP/1.1 401 Unauthorized\r\nWWW-Authenticate: Bearer\r\n\r\n{\"error\":\"bad credentials\"}";

    let req = parse_raw_request(service, raw_request.as_bytes()).unwrap();
    let resp = parse_raw_response(raw_response.as_bytes()).unwrap();
    extension
        .hook()
        .on_exchange_complete(&req, &resp, ToolType::Repeater);

    let context = ActionContext::with_selection(Some(req), Some(resp));
    assert!(extension
        .handle(Trigger::CopyTabHistory, &context)
        .is_success());

    let report = clipboard.contents().unwrap();
    assert!(report.contains(&format!("{}\n\n{}", raw_request, "-".repeat(80))));
    assert!(report.contains(&format!("{}\n\n{}", raw_response, "=".repeat(80))));
}
