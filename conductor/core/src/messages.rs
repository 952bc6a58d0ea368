//! Transcript Messages
//!
//! Identifiers, roles and entry types shared by the transcript store, the
//! event router and the turn orchestrator.
//!
//! # Design Philosophy
//!
//! A transcript entry is written once and never touched again. How an entry
//! is framed and counted is decided by its [`Role`] alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session identifier
///
/// Opaque to the core: it is handed out by the session service and only used
/// as a key for statistics and to derive the transcript file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Who produced a transcript entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The human at the console
    User,
    /// Final answer of the router agent
    AgentResponse,
    /// Router agent forwarding a message to the answering agent
    AgentToAgentCall,
    /// Answer coming back from the answering agent
    AgentToAgentResult,
    /// Any other tool invocation
    ToolCall,
    /// System or otherwise unclassified message
    System,
}

/// Statistics bucket a role is counted in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleCategory {
    /// Counted in `user_messages`
    User,
    /// Counted in `agent_responses`
    Agent,
    /// Counted in `function_calls`
    Function,
    /// Only counted in `message_count`
    Other,
}

impl Role {
    /// Wire/log name of the role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::AgentResponse => "AGENT_RESPONSE",
            Self::AgentToAgentCall => "AGENT_TO_AGENT_CALL",
            Self::AgentToAgentResult => "AGENT_TO_AGENT_RESULT",
            Self::ToolCall => "TOOL_CALL",
            Self::System => "SYSTEM",
        }
    }

    /// Which statistics counter this role increments
    ///
    /// Every agent role, relay calls and results included, counts as an
    /// agent response.
    #[must_use]
    pub fn category(&self) -> RoleCategory {
        match self {
            Self::User => RoleCategory::User,
            Self::AgentResponse | Self::AgentToAgentCall | Self::AgentToAgentResult => {
                RoleCategory::Agent
            }
            Self::ToolCall => RoleCategory::Function,
            Self::System => RoleCategory::Other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of message carried by an entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Text typed by the user
    UserInput,
    /// Final text produced by the router agent
    AgentResponse,
    /// Outgoing tool invocation
    FunctionCall,
    /// Tool result
    FunctionResponse,
    /// Anything else
    #[default]
    General,
}

impl MessageType {
    /// Log name of the message type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserInput => "user_input",
            Self::AgentResponse => "agent_response",
            Self::FunctionCall => "function_call",
            Self::FunctionResponse => "function_response",
            Self::General => "general",
        }
    }
}

/// One immutable line of the conversation record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Session the entry belongs to
    pub session_id: SessionId,
    /// Who produced it
    pub role: Role,
    /// Entry text
    pub text: String,
    /// Kind of message
    pub message_type: MessageType,
    /// Local wall-clock time the entry was written
    pub timestamp: chrono::DateTime<chrono::Local>,
    /// Turn latency, only for agent responses
    pub response_time_ms: Option<f64>,
}
