//! Console text
//!
//! Everything the console prints on stdout. Logging goes to stderr and never
//! passes through here.

use std::path::Path;

use relay_core::{SessionStats, TurnError};

/// Input prompt
pub const PROMPT: &str = "\n👤 You: ";

/// Printed while a turn is running
pub const THINKING: &str = "🤔 Agent is thinking...\n";

/// Printed on Ctrl+C or end of input
pub const GOODBYE: &str = "\n\nConversation ended. Goodbye!\n";

/// Welcome banner
pub fn banner(log_path: &Path) -> String {
    let mut out = String::new();
    out.push_str("🤖 Welcome to A2A Relay Console!\n");
    out.push_str("💬 Ask questions about users in the database.\n");
    out.push_str("🔥 Press Ctrl+C to exit the conversation.\n");
    out.push_str(&format!("📝 Transcript: {}\n", log_path.display()));
    out.push_str(&"─".repeat(50));
    out.push('\n');
    out
}

/// Final answer of a turn
pub fn answer(text: &str) -> String {
    format!("\n🤖 Agent: {text}\n")
}

/// Turn finished without an answer
pub fn no_answer() -> String {
    "\n🤖 Agent: (no answer)\n".to_string()
}

/// Mini statistics after a turn
pub fn stats_line(stats: &SessionStats) -> String {
    format!(
        "📊 Stats: {} msgs | {} 👤 | {} 🤖\n",
        stats.message_count, stats.user_messages, stats.agent_responses
    )
}

/// Aborted turn
pub fn failure(error: &TurnError) -> String {
    format!("❌ {error}\n")
}
