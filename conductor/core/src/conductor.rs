//! Conductor - The Turn Orchestrator
//!
//! The Conductor drives one user turn end to end:
//! - Records the user's message
//! - Runs the local agent loop on it
//! - Feeds the resulting events to the event router
//! - Returns the final answer with its latency
//!
//! # Design Philosophy
//!
//! The Conductor holds no conversation state of its own. The caller owns the
//! [`Session`] and passes it into every turn, and the transcript store is
//! injected so one store can serve several conductors.
//!
//! ```text
//! user text ──> Conductor ──> AgentLoop ──> events ──> EventRouter ──> TranscriptStore
//!                                 │                        ▲
//!                                 └── relay tool call ─────┘ (as tool response events)
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::agent::{AgentLoop, DEFAULT_RELAY_TOOL};
use crate::error::TurnError;
use crate::messages::{MessageType, Role};
use crate::routing::EventRouter;
use crate::session::Session;
use crate::transcript::{SessionStats, TranscriptStore};

/// Conductor configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConductorConfig {
    /// Name under which the agent loop reports relay tool events
    pub relay_tool: String,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            relay_tool: DEFAULT_RELAY_TOOL.to_string(),
        }
    }
}

/// Result of a completed turn
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    /// Final answer text
    pub text: String,
    /// Turn latency in milliseconds
    pub elapsed_ms: f64,
}

/// The Conductor - headless turn orchestrator
pub struct Conductor<A: AgentLoop> {
    /// Configuration
    config: ConductorConfig,
    /// Local agent loop
    agent: A,
    /// Shared transcript store
    store: Arc<TranscriptStore>,
}

impl<A: AgentLoop> Conductor<A> {
    /// Create a new Conductor
    pub fn new(agent: A, store: Arc<TranscriptStore>, config: ConductorConfig) -> Self {
        Self {
            config,
            agent,
            store,
        }
    }

    /// Get the transcript store
    pub fn store(&self) -> &Arc<TranscriptStore> {
        &self.store
    }

    /// Current statistics of a session
    pub async fn stats(&self, session: &Session) -> Option<SessionStats> {
        self.store.stats(&session.id).await
    }

    /// Run one user turn
    ///
    /// The user entry is written before the agent loop starts. `Ok(None)`
    /// means the loop finished without producing an answer. On error only
    /// the entries written before the failure remain.
    pub async fn run_turn(
        &self,
        session: &Session,
        message: &str,
    ) -> Result<Option<TurnOutcome>, TurnError> {
        self.store
            .record(&session.id, Role::User, message, MessageType::UserInput, None)
            .await?;

        let started = Instant::now();
        let events = self.agent.run(session, message);
        let router = EventRouter::new(&self.store, &self.config.relay_tool);

        match router.route(&session.id, events, started).await {
            Ok(Some(answer)) => {
                let elapsed_ms = answer.elapsed_ms();
                info!(
                    session_id = %session.id,
                    elapsed_ms,
                    "Turn completed"
                );
                Ok(Some(TurnOutcome {
                    text: answer.text,
                    elapsed_ms,
                }))
            }
            Ok(None) => {
                warn!(session_id = %session.id, "Agent loop ended without a final answer");
                Ok(None)
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Turn aborted");
                Err(e)
            }
        }
    }
}
