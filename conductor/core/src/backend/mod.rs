//! Agent Relay Integration
//!
//! This module provides access to the secondary answering agent through a
//! common trait interface. The router agent uses it as a single
//! request/response tool.
//!
//! # Available Relays
//!
//! - **Remote**: Agent API server reached over HTTP with SSE-framed replies
//!
//! # Usage
//!
//! ```ignore
//! use relay_core::backend::{AgentRelay, RemoteAgentClient};
//! use relay_core::RelayToml;
//!
//! let relay = RemoteAgentClient::new(RelayToml::default().remote_config())?;
//! let outcome = relay.ask("Who is john_doe?").await?;
//! ```

mod remote;
mod traits;

pub use remote::RemoteAgentClient;
pub use traits::{relay_tool_result, AgentRelay, RelayError, RemoteConfig, FALLBACK_SESSION_ID};
