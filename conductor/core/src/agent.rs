//! Agent Execution Loop
//!
//! Boundary to the local agent-execution loop that turns one user message
//! into an ordered, lazily produced sequence of [`AgentEvent`]s.
//!
//! # Design Philosophy
//!
//! Planning and reasoning are not the core's business. An [`AgentLoop`] is
//! anything that can produce the event feed for a turn; the core never
//! drives the reasoning, it only consumes the feed.
//!
//! [`RelayAgent`] is the loop the console ships with: it forwards every user
//! message to the answering agent through the relay tool and answers with
//! whatever comes back.

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::backend::{relay_tool_result, AgentRelay, RelayError};
use crate::events::AgentEvent;
use crate::session::Session;
use crate::streaming::StreamOutcome;

/// Default name of the relay tool as the router agent knows it
pub const DEFAULT_RELAY_TOOL: &str = "ask_llm_agent";

/// Errors surfaced by an agent loop in place of an event
#[derive(Debug, Error)]
pub enum AgentError {
    /// The relay tool failed
    #[error("relay failed: {0}")]
    Relay(#[from] RelayError),

    /// Any other tool or loop failure
    #[error("agent loop failed: {0}")]
    Tool(String),
}

/// Event feed of one turn
pub type AgentEventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent, AgentError>> + Send>>;

/// Local agent-execution loop
pub trait AgentLoop: Send + Sync {
    /// Start a turn and return its event feed
    ///
    /// The feed is single-pass; dropping it abandons the rest of the turn.
    fn run(&self, session: &Session, message: &str) -> AgentEventStream;
}

/// Agent loop that answers every message by relaying it
pub struct RelayAgent<R: AgentRelay> {
    relay: Arc<R>,
    tool_name: String,
    buffer: usize,
}

impl<R: AgentRelay + 'static> RelayAgent<R> {
    /// Create a loop around a relay
    pub fn new(relay: R) -> Self {
        Self {
            relay: Arc::new(relay),
            tool_name: DEFAULT_RELAY_TOOL.to_string(),
            buffer: 16,
        }
    }

    /// Set the tool name reported in events
    #[must_use]
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }
}

impl<R: AgentRelay + 'static> AgentLoop for RelayAgent<R> {
    fn run(&self, session: &Session, message: &str) -> AgentEventStream {
        let (tx, rx) = mpsc::channel(self.buffer);
        let relay = Arc::clone(&self.relay);
        let tool = self.tool_name.clone();
        let message = message.to_string();
        let session_id = session.id.clone();

        tokio::spawn(async move {
            let call = AgentEvent::tool_call(&tool, serde_json::json!({ "message": &message }));
            if tx.send(Ok(call)).await.is_err() {
                return;
            }

            match relay.ask(&message).await {
                Ok(outcome) => {
                    let result = relay_tool_result(&outcome);
                    if tx
                        .send(Ok(AgentEvent::tool_response(&tool, result)))
                        .await
                        .is_err()
                    {
                        return;
                    }

                    let answer = match outcome {
                        StreamOutcome::Success { text, .. } => text,
                        StreamOutcome::SuccessNoText { chunks } => chunks.join("\n"),
                    };
                    let _ = tx.send(Ok(AgentEvent::final_text(answer))).await;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        relay = relay.name(),
                        error = %e,
                        "Relay call failed"
                    );
                    let _ = tx.send(Err(AgentError::Relay(e))).await;
                }
            }
        });

        Box::pin(ReceiverStream::new(rx))
    }
}
