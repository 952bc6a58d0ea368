//! Relay Core - Agent-to-Agent Relay with Session Transcripts
//!
//! This crate holds the headless logic of the relay: a local agent loop that
//! answers user questions by forwarding them to a remote answering agent over
//! HTTP, and a transcript store that records every turn to a per-session log.
//! It has no terminal dependencies and can be driven by any front end.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Front End (console)                       │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │ user text
//! ┌───────────────────────────────┼──────────────────────────────────┐
//! │                          RELAY CORE                               │
//! │  ┌────────────────────────────┴───────────────────────────────┐  │
//! │  │                         Conductor                          │  │
//! │  │  ┌────────────┐   ┌─────────────┐   ┌───────────────────┐  │  │
//! │  │  │ AgentLoop  │──>│ EventRouter │──>│  TranscriptStore  │  │  │
//! │  │  │(RelayAgent)│   └─────────────┘   │ logs + stats      │  │  │
//! │  │  └─────┬──────┘                     └───────────────────┘  │  │
//! │  └────────┼───────────────────────────────────────────────────┘  │
//! │           │ AgentRelay                                           │
//! │  ┌────────┴─────────┐     ┌──────────────────┐                   │
//! │  │ RemoteAgentClient│────>│ SSE frame decoder│                   │
//! │  └────────┬─────────┘     └──────────────────┘                   │
//! └───────────┼──────────────────────────────────────────────────────┘
//!             │ POST /apps/{app}/users/{user}/sessions, POST /run_sse
//!             ▼
//!     remote answering agent
//! ```
//!
//! # Key Types
//!
//! - [`Conductor`]: Runs one user turn end to end
//! - [`RemoteAgentClient`]: HTTP client for the remote agent
//! - [`RelayAgent`]: Agent loop that exposes the relay as a tool
//! - [`TranscriptStore`]: Append-only session logs with statistics
//! - [`EventRouter`]: Maps agent events to transcript entries
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use relay_core::{
//!     Conductor, InMemorySessionService, RelayAgent, RelayToml, RemoteAgentClient,
//!     SessionService, TranscriptStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RelayToml::default();
//!     let client = RemoteAgentClient::new(config.remote_config())?;
//!     let store = Arc::new(TranscriptStore::open(config.transcript_config()).await?);
//!     let conductor = Conductor::new(RelayAgent::new(client), store, config.conductor_config());
//!
//!     let session = InMemorySessionService::new().create_session("robot", "user").await?;
//!     if let Some(outcome) = conductor.run_turn(&session, "Who is john_doe?").await? {
//!         println!("{}", outcome.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`agent`]: Local agent loop and the relay tool
//! - [`backend`]: Remote agent client and relay abstraction
//! - [`conductor`]: Turn orchestration
//! - [`config`]: TOML configuration with env and CLI overrides
//! - [`error`]: Turn-level errors
//! - [`events`]: Events emitted by the agent loop
//! - [`messages`]: Session ids, roles and transcript entries
//! - [`routing`]: Event classification into transcript entries
//! - [`session`]: Local session service
//! - [`streaming`]: Server-sent event decoding
//! - [`transcript`]: Session logs and statistics

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod backend;
pub mod conductor;
pub mod config;
pub mod error;
pub mod events;
pub mod messages;
pub mod routing;
pub mod session;
pub mod streaming;
pub mod transcript;

// Re-exports for convenience
pub use agent::{AgentError, AgentEventStream, AgentLoop, RelayAgent, DEFAULT_RELAY_TOOL};
pub use backend::{
    relay_tool_result, AgentRelay, RelayError, RemoteAgentClient, RemoteConfig,
    FALLBACK_SESSION_ID,
};
pub use conductor::{Conductor, ConductorConfig, TurnOutcome};
pub use error::TurnError;
pub use events::AgentEvent;
pub use messages::{MessageType, Role, RoleCategory, SessionId, TranscriptEntry};
pub use routing::{EventRouter, RoutedAnswer};
pub use session::{InMemorySessionService, Session, SessionService};
pub use streaming::{decode_sse_body, StreamOutcome};
pub use transcript::{SessionStats, TranscriptConfig, TranscriptError, TranscriptStore};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, RelayToml,
};
