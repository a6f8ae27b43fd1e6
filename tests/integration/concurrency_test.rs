//! Concurrent capture while copy actions read.

use super::{init_test_env, request, response};
use repeater_history::actions::{ActionContext, ActionDispatcher, MemoryClipboard, Trigger};
use repeater_history::capture::{CaptureHook, TabHistoryStore};
use repeater_history::formatter::format_history;
use repeater_history::models::{HttpMethod, ToolType};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn test_concurrent_appends_to_one_key() {
    init_test_env();
    let store = Arc::new(TabHistoryStore::new());
    let hook = CaptureHook::new(Arc::clone(&store), ToolType::Repeater);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let hook = hook.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let path = format!("/{}/{}", t, i);
                    let req = request("example.com", 443, HttpMethod::GET, &path);
                    let outcome = hook.on_exchange_complete(
                        &req,
                        &response(200, "OK", ""),
                        ToolType::Repeater,
                    );
                    assert!(outcome.is_captured());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = store.snapshot("example.com:443").unwrap();
    assert_eq!(snapshot.len(), THREADS * PER_THREAD);
    assert_eq!(store.tab_count(), 1);

    // Each thread's appends appear in the order that thread issued them.
    for t in 0..THREADS {
        let prefix = format!("/{}/", t);
        let seen: Vec<usize> = snapshot
            .iter()
            .filter_map(|record| record.request())
            .filter_map(|req| req.path.strip_prefix(&prefix))
            .map(|i| i.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..PER_THREAD).collect::<Vec<_>>());
    }
}

#[test]
fn test_concurrent_appends_to_many_keys() {
    init_test_env();
    let store = Arc::new(TabHistoryStore::new());
    let hook = CaptureHook::new(Arc::clone(&store), ToolType::Repeater);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let hook = hook.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    // Every thread touches every key.
                    let port = 8000 + (i % 4) as u16;
                    let req = request("host.test", port, HttpMethod::GET, &format!("/{}", t));
                    hook.on_exchange_complete(&req, &response(200, "OK", ""), ToolType::Repeater);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.tab_count(), 4);
    assert_eq!(store.total_entries(), THREADS * PER_THREAD);
    // 50 requests over 4 ports: 13, 13, 12, 12 per thread.
    for (port, per_thread) in [(8000, 13), (8001, 13), (8002, 12), (8003, 12)] {
        assert_eq!(
            store.entry_count(&format!("host.test:{}", port)),
            THREADS * per_thread
        );
    }
}

#[test]
fn test_snapshots_stay_consistent_during_capture() {
    init_test_env();
    let store = Arc::new(TabHistoryStore::new());
    let hook = CaptureHook::new(Arc::clone(&store), ToolType::Repeater);
    let clipboard = Arc::new(MemoryClipboard::new());
    let dispatcher = ActionDispatcher::new(Arc::clone(&store), clipboard.clone());

    hook.on_exchange_complete(
        &request("example.com", 443, HttpMethod::GET, "/seed"),
        &response(200, "OK", ""),
        ToolType::Repeater,
    );

    let writer = {
        let hook = hook.clone();
        thread::spawn(move || {
            for i in 0..500 {
                let req = request("example.com", 443, HttpMethod::GET, &format!("/{}", i));
                hook.on_exchange_complete(&req, &response(200, "OK", ""), ToolType::Repeater);
            }
        })
    };

    let context = ActionContext::with_selection(
        Some(request("example.com", 443, HttpMethod::GET, "/")),
        None,
    );
    let mut last_len = 0;
    for _ in 0..50 {
        let snapshot = store.snapshot("example.com:443").unwrap();
        assert!(snapshot.len() >= last_len, "history never shrinks");
        last_len = snapshot.len();

        // A snapshot formats the same way no matter what arrives afterwards.
        let before = format_history(&snapshot, "example.com:443");
        assert!(before.contains(&format!("Total Entries: {}\n", snapshot.len())));
        assert_eq!(format_history(&snapshot, "example.com:443"), before);

        assert!(dispatcher.dispatch(Trigger::CopyTabHistory, &context).is_success());
    }

    writer.join().unwrap();
    assert_eq!(store.entry_count("example.com:443"), 501);
}
