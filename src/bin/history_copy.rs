//! Replays a capture file through the history copy extension.
//!
//! Each line of the capture file is a JSON object describing one exchange:
//!
//! ```text
//! {"tool": "repeater", "url": "https://example.com", "request": "GET / HTTP/1.1\r\n...", "response": "HTTP/1.1 200 OK\r\n..."}
//! ```
//!
//! `response` may be omitted or null. After replaying, the selected history
//! is "copied" to stdout; notices and logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! history-copy <capture.jsonl> [--tab <host:port> | --all] [--settings <settings.json>]
//! ```
//!
//! Without `--tab` or `--all`, every captured destination is printed in turn.
//! Settings that fail validation are reported and the defaults are used.

use repeater_history::actions::{
    ActionContext, ClipboardError, ClipboardSink, LogNotices, Trigger,
};
use repeater_history::config::{get_config, load_config};
use repeater_history::extension::HistoryCopyExtension;
use repeater_history::models::ToolType;
use repeater_history::parser::{parse_raw_request, parse_raw_response, parse_service};
use serde::Deserialize;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

/// One line of the capture file.
#[derive(Debug, Deserialize)]
struct CapturedExchange {
    tool: ToolType,
    url: String,
    request: String,
    #[serde(default)]
    response: Option<String>,
}

/// Writes copied text to stdout.
struct StdoutClipboard;

impl ClipboardSink for StdoutClipboard {
    fn set_contents(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

enum Selection {
    Tab(String),
    All,
    EveryTab,
}

struct Args {
    capture_file: String,
    selection: Selection,
    settings_file: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool, String> {
    let args = parse_args(std::env::args().skip(1))?;

    if let Some(path) = &args.settings_file {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {}", path, e))?;
        let settings = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse settings {}: {}", path, e))?;
        if let Err(e) = load_config(Some(settings)) {
            log::warn!("Ignoring settings {}: {}", path, e);
        }
    }

    let extension =
        HistoryCopyExtension::new(get_config(), Arc::new(StdoutClipboard), Arc::new(LogNotices));

    let content = std::fs::read_to_string(&args.capture_file)
        .map_err(|e| format!("Failed to read {}: {}", args.capture_file, e))?;
    replay(&extension, &content);

    let mut ok = true;
    match args.selection {
        Selection::All => {
            ok &= extension
                .handle(Trigger::CopyAllHistory, &ActionContext::empty())
                .is_success();
        }
        Selection::Tab(key) => {
            ok &= extension.handle_key(&key).is_success();
        }
        Selection::EveryTab => {
            for key in extension.store().keys() {
                ok &= extension.handle_key(&key).is_success();
            }
        }
    }

    Ok(ok)
}

/// Feeds every line of the capture file through the extension's hook.
///
/// Malformed lines are logged and skipped.
fn replay(extension: &HistoryCopyExtension, content: &str) {
    let hook = extension.hook();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = idx + 1;

        let exchange: CapturedExchange = match serde_json::from_str(line) {
            Ok(exchange) => exchange,
            Err(e) => {
                log::warn!("Line {}: invalid capture entry: {}", line_number, e);
                continue;
            }
        };

        let parsed = parse_service(&exchange.url).and_then(|service| {
            let request = parse_raw_request(service, exchange.request.as_bytes())?;
            let response = exchange
                .response
                .as_deref()
                .map(|raw| parse_raw_response(raw.as_bytes()))
                .transpose()?;
            Ok((request, response))
        });

        match parsed {
            Ok((request, Some(response))) => {
                hook.on_request_to_be_sent(&request, exchange.tool);
                hook.on_exchange_complete(&request, &response, exchange.tool);
            }
            Ok((request, None)) => {
                // Sent but never answered: nothing to record.
                hook.on_request_to_be_sent(&request, exchange.tool);
            }
            Err(e) => log::warn!("Line {}: {}", line_number, e),
        }
    }

    log::info!(
        "Replayed capture: {} entries across {} destinations",
        extension.store().total_entries(),
        extension.store().tab_count()
    );
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    const USAGE: &str =
        "usage: history-copy <capture.jsonl> [--tab <host:port> | --all] [--settings <settings.json>]";

    let mut capture_file = None;
    let mut selection = Selection::EveryTab;
    let mut settings_file = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tab" => {
                let key = args
                    .next()
                    .ok_or_else(|| format!("--tab needs a host:port key\n{}", USAGE))?;
                selection = Selection::Tab(key);
            }
            "--all" => selection = Selection::All,
            "--settings" => {
                settings_file = Some(
                    args.next()
                        .ok_or_else(|| format!("--settings needs a path\n{}", USAGE))?,
                );
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if capture_file.is_none() && !arg.starts_with("--") => capture_file = Some(arg),
            _ => return Err(format!("unexpected argument '{}'\n{}", arg, USAGE)),
        }
    }

    Ok(Args {
        capture_file: capture_file.ok_or_else(|| USAGE.to_string())?,
        selection,
        settings_file,
    })
}
