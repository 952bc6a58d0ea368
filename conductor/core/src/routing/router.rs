//! Event Router
//!
//! Consumes the event feed of one turn, writes the relay exchange into the
//! transcript and stops at the first final answer.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::debug;

use crate::agent::AgentError;
use crate::error::TurnError;
use crate::events::AgentEvent;
use crate::messages::{MessageType, Role, SessionId};
use crate::transcript::TranscriptStore;

/// Final answer of a turn
#[derive(Clone, Debug, PartialEq)]
pub struct RoutedAnswer {
    /// Answer text
    pub text: String,
    /// Time from turn start to the final event
    pub elapsed: Duration,
}

impl RoutedAnswer {
    /// Elapsed time in fractional milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Routes agent events to transcript entries
pub struct EventRouter<'a> {
    store: &'a TranscriptStore,
    relay_tool: &'a str,
}

impl<'a> EventRouter<'a> {
    /// Create a router that recognises `relay_tool` as the inter-agent relay
    pub fn new(store: &'a TranscriptStore, relay_tool: &'a str) -> Self {
        Self { store, relay_tool }
    }

    /// Route one turn's events in arrival order
    ///
    /// Returns `Ok(None)` when the feed ends without a final event. Events
    /// after the first final one are never pulled from the feed.
    pub async fn route<S>(
        &self,
        session_id: &SessionId,
        mut events: S,
        started: Instant,
    ) -> Result<Option<RoutedAnswer>, TurnError>
    where
        S: Stream<Item = Result<AgentEvent, AgentError>> + Unpin,
    {
        while let Some(item) = events.next().await {
            match item? {
                AgentEvent::ToolCall { tool_name, args } if tool_name == self.relay_tool => {
                    let message = required_str(&args, "message", &tool_name)?;
                    self.store
                        .record(
                            session_id,
                            Role::AgentToAgentCall,
                            message,
                            MessageType::FunctionCall,
                            None,
                        )
                        .await?;
                }
                AgentEvent::ToolResponse { tool_name, result } if tool_name == self.relay_tool => {
                    let text = result_text(&result, &tool_name)?;
                    self.store
                        .record(
                            session_id,
                            Role::AgentToAgentResult,
                            &text,
                            MessageType::FunctionResponse,
                            None,
                        )
                        .await?;
                }
                AgentEvent::Text {
                    text,
                    is_final: true,
                } => {
                    let answer = RoutedAnswer {
                        text,
                        elapsed: started.elapsed(),
                    };
                    self.store
                        .record(
                            session_id,
                            Role::AgentResponse,
                            &answer.text,
                            MessageType::AgentResponse,
                            Some(answer.elapsed_ms()),
                        )
                        .await?;
                    return Ok(Some(answer));
                }
                other => {
                    debug!(session_id = %session_id, event = event_kind(&other), "Event not recorded");
                }
            }
        }

        Ok(None)
    }
}

fn required_str<'v>(value: &'v Value, field: &'static str, tool: &str) -> Result<&'v str, TurnError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| TurnError::MissingField {
            tool: tool.to_string(),
            field,
        })
}

/// Text of a relay result
///
/// A result without `text` but with raw `chunks` is the degraded no-text
/// reply; its chunks stand in for the text, one per line.
fn result_text<'v>(result: &'v Value, tool: &str) -> Result<Cow<'v, str>, TurnError> {
    if let Some(text) = result.get("text").and_then(Value::as_str) {
        return Ok(Cow::Borrowed(text));
    }
    match result.get("chunks").and_then(Value::as_array) {
        Some(chunks) => Ok(Cow::Owned(
            chunks
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        )),
        None => Err(TurnError::MissingField {
            tool: tool.to_string(),
            field: "text",
        }),
    }
}

fn event_kind(event: &AgentEvent) -> &'static str {
    match event {
        AgentEvent::Text { .. } => "text",
        AgentEvent::ToolCall { .. } => "tool_call",
        AgentEvent::ToolResponse { .. } => "tool_response",
    }
}
