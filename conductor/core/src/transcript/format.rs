//! Human-readable transcript layout
//!
//! Every block is rendered to a `String` first so the store can append it
//! with a single write.

use chrono::{DateTime, Local};

use super::stats::SessionStats;
use crate::messages::{Role, SessionId};

const HEADER_RULE: usize = 60;
const FOOTER_RULE: usize = 55;
const STATS_RULE: usize = 37;

/// Soft-wrap text at `width` characters
///
/// Breaks at the last whitespace before the limit, or hard at the limit when
/// the line has none. Embedded newlines start a new line.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.lines().flat_map(|line| wrap_line(line, width.max(1))).collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = line;

    while let Some((limit, _)) = rest.char_indices().nth(width) {
        let split = rest[..limit]
            .rfind(char::is_whitespace)
            .filter(|&i| i > 0)
            .unwrap_or(limit);
        lines.push(rest[..split].to_string());
        rest = rest[split..].trim_start();
    }

    if !rest.is_empty() || lines.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}

/// Icon, label and rule length of a role's frame
fn frame_label(role: Role) -> (&'static str, usize) {
    match role {
        Role::User => ("👤 USER", 35),
        Role::AgentResponse => ("🤖 AGENT", 33),
        Role::AgentToAgentCall => ("🔄 AGENT→AGENT", 25),
        Role::AgentToAgentResult => ("📊 REMOTE AGENT", 24),
        Role::ToolCall => ("🔧 FUNCTION", 27),
        Role::System => ("ℹ️  SYSTEM", 29),
    }
}

/// Header written once at the top of a new log file
#[must_use]
pub fn format_header(session_id: &SessionId, started: &DateTime<Local>) -> String {
    let rule = "=".repeat(HEADER_RULE);
    format!(
        "🤖 A2A RELAY SESSION LOG\n{rule}\n📅 Session ID: {session_id}\n⏰ Started: {}\n{rule}\n\n",
        started.format("%Y-%m-%d %H:%M:%S")
    )
}

/// One framed entry
#[must_use]
pub fn format_entry(
    role: Role,
    text: &str,
    timestamp: &DateTime<Local>,
    response_time_ms: Option<f64>,
    width: usize,
) -> String {
    let (label, rule) = frame_label(role);
    let mut out = format!(
        "┌─ {label} [{}] {}\n",
        timestamp.format("%H:%M:%S"),
        "─".repeat(rule)
    );

    let lines = wrap_text(text, width);
    let prefix = match (role, lines.len()) {
        (Role::AgentToAgentCall, 1) => "│ 📤 Sending: ",
        (Role::AgentToAgentResult, 1) => "│ 📥 Response: ",
        _ => "│ ",
    };
    for line in &lines {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }

    if role == Role::AgentResponse {
        if let Some(ms) = response_time_ms.filter(|ms| *ms > 0.0) {
            out.push_str(&format!("│ ⚡ Response time: {ms:.1}ms\n"));
        }
    }

    out.push('└');
    out.push_str(&"─".repeat(FOOTER_RULE));
    out.push_str("\n\n");
    out
}

/// Statistics snapshot block
#[must_use]
pub fn format_stats(stats: &SessionStats) -> String {
    format!(
        "📈 SESSION STATS {}\n\
         💬 Total Messages: {}\n\
         👤 User Messages: {}\n\
         🤖 Agent Responses: {}\n\
         🔧 Function Calls: {}\n\
         ⏱️  Duration: {:.1}s\n\
         {}\n\n",
        "─".repeat(20),
        stats.message_count,
        stats.user_messages,
        stats.agent_responses,
        stats.function_calls,
        stats.elapsed().as_secs_f64(),
        "─".repeat(STATS_RULE),
    )
}
