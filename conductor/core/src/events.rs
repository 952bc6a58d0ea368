//! Agent Events
//!
//! Events produced by the local agent-execution loop for one user turn. The
//! loop is an external collaborator; the core only consumes its output.
//!
//! # Design Philosophy
//!
//! The event shape is decided once, where the loop hands events over. The
//! router then matches on the variant instead of probing payloads for
//! optional fields.

use serde::{Deserialize, Serialize};

/// One event of a turn, in arrival order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Plain text from the router agent
    Text {
        /// The text
        text: String,
        /// Whether this is the answer to return to the user
        is_final: bool,
    },

    /// The router agent invoked a tool
    ToolCall {
        /// Name of the invoked tool
        tool_name: String,
        /// Call arguments as produced by the agent
        args: serde_json::Value,
    },

    /// A tool returned
    ToolResponse {
        /// Name of the tool that returned
        tool_name: String,
        /// Result object handed back to the agent
        result: serde_json::Value,
    },
}

impl AgentEvent {
    /// Create a non-final text event
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            is_final: false,
        }
    }

    /// Create the terminal text event of a turn
    pub fn final_text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            is_final: true,
        }
    }

    /// Create a tool call event
    pub fn tool_call(tool_name: impl Into<String>, args: serde_json::Value) -> Self {
        Self::ToolCall {
            tool_name: tool_name.into(),
            args,
        }
    }

    /// Create a tool response event
    pub fn tool_response(tool_name: impl Into<String>, result: serde_json::Value) -> Self {
        Self::ToolResponse {
            tool_name: tool_name.into(),
            result,
        }
    }

    /// Whether this event ends the turn
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Text { is_final: true, .. })
    }
}
