//! Text reports of captured traffic.
//!
//! The reports are plain text meant to be pasted elsewhere (tickets, chat,
//! notes), so the layout is fixed: 80-column `=` rules around each entry,
//! `-` rules between a request and its response, and the raw wire text of
//! each message as-is. Formatting is pure; the same records always produce
//! byte-identical output.

use crate::capture::EventRecord;

/// Width of separator rules.
pub const SEPARATOR_WIDTH: usize = 80;

/// Header of a per-destination report.
pub const TAB_HISTORY_TITLE: &str = "BURP REPEATER TAB HISTORY";

/// Header of a report covering every destination.
pub const ALL_HISTORY_TITLE: &str = "BURP REPEATER HISTORY";

/// Placeholder for a record without a request.
pub const NO_REQUEST_DATA: &str = "[No request data]";

/// Placeholder for a record without a response.
pub const NO_RESPONSE_DATA: &str = "[No response data]";

/// Formats the history of one destination group.
///
/// Entries are numbered from 1 in the order given.
///
/// # Examples
///
/// ```
/// use repeater_history::formatter::format_history;
///
/// let report = format_history(&[], "host:80");
/// assert!(report.contains("Tab: host:80\nTotal Entries: 0\n"));
/// assert!(!report.contains("REQUEST #"));
/// ```
pub fn format_history(records: &[EventRecord], group_label: &str) -> String {
    format_report(TAB_HISTORY_TITLE, Some(group_label), records)
}

/// Formats every captured record regardless of destination.
///
/// Same layout as [`format_history`] without the `Tab:` line.
pub fn format_all_history(records: &[EventRecord]) -> String {
    format_report(ALL_HISTORY_TITLE, None, records)
}

/// Formats a single request/response pair under `"{label} REQUEST/RESPONSE"`.
pub fn format_single(record: &EventRecord, label: &str) -> String {
    let separator = major_separator();
    let mut output = String::new();

    output.push_str(&format!("{} REQUEST/RESPONSE\n", label));
    output.push_str(&separator);
    output.push_str("\n\n");

    push_exchange(&mut output, record, "REQUEST", "RESPONSE");

    output.push('\n');
    output.push_str(&separator);
    output.push('\n');

    output
}

fn format_report(title: &str, group_label: Option<&str>, records: &[EventRecord]) -> String {
    let separator = major_separator();
    let mut output = String::new();

    output.push_str(title);
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');
    if let Some(label) = group_label {
        output.push_str(&format!("Tab: {}\n", label));
    }
    output.push_str(&format!("Total Entries: {}\n", records.len()));
    output.push_str(&separator);
    output.push_str("\n\n");

    for (index, record) in records.iter().enumerate() {
        let number = index + 1;
        push_exchange(
            &mut output,
            record,
            &format!("REQUEST #{}", number),
            &format!("RESPONSE #{}", number),
        );

        output.push('\n');
        output.push_str(&separator);
        output.push_str("\n\n");
    }

    output
}

/// Writes the request heading, request text, response heading and response
/// text of one record. The caller writes the closing rule.
fn push_exchange(
    output: &mut String,
    record: &EventRecord,
    request_heading: &str,
    response_heading: &str,
) {
    let minor = minor_separator();

    output.push_str(request_heading);
    output.push('\n');
    output.push_str(&major_separator());
    output.push('\n');
    match record.request() {
        Some(request) => output.push_str(&request.to_string()),
        None => output.push_str(NO_REQUEST_DATA),
    }
    output.push('\n');

    output.push('\n');
    output.push_str(&minor);
    output.push('\n');
    output.push_str(response_heading);
    output.push('\n');
    output.push_str(&minor);
    output.push('\n');
    match record.response() {
        Some(response) => output.push_str(&response.to_string()),
        None => output.push_str(NO_RESPONSE_DATA),
    }
    output.push('\n');
}

fn major_separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

fn minor_separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}
