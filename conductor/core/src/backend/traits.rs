//! Relay Traits
//!
//! Trait definitions for reaching the answering agent. The router agent only
//! ever sees a single request/response tool; how the message travels is up to
//! the implementation.
//!
//! # Design Philosophy
//!
//! The `AgentRelay` trait provides a common interface for:
//! - Forwarding one message and getting one decoded answer back
//! - Naming the relay for logs
//!
//! Implementations handle the remote protocol (session negotiation, framing).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::streaming::StreamOutcome;

/// Fallback remote session id when the server does not hand one out
pub const FALLBACK_SESSION_ID: &str = "default_session";

/// Errors raised while talking to the answering agent
#[derive(Debug, Error)]
pub enum RelayError {
    /// The remote answered with a non-2xx status
    #[error("remote agent returned {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl RelayError {
    /// HTTP status code, when the failure was a non-2xx response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Client(_) => None,
        }
    }
}

/// Relay to a secondary answering agent
#[async_trait]
pub trait AgentRelay: Send + Sync {
    /// Get the relay name (e.g., "remote-agent")
    fn name(&self) -> &str;

    /// Forward a message and decode the answer
    ///
    /// A `SuccessNoText` outcome is degraded but not an error.
    async fn ask(&self, message: &str) -> Result<StreamOutcome, RelayError>;
}

/// Convert a relay outcome into the result object the router agent sees
#[must_use]
pub fn relay_tool_result(outcome: &StreamOutcome) -> serde_json::Value {
    match outcome {
        StreamOutcome::Success { text, raw_payload } => serde_json::json!({
            "status": outcome.status(),
            "text": text,
            "data": raw_payload,
        }),
        StreamOutcome::SuccessNoText { chunks } => serde_json::json!({
            "status": outcome.status(),
            "message": "Got SSE response with no final text",
            "chunks": chunks,
        }),
    }
}

/// Remote agent connection configuration
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// Base URL of the agent API server
    pub base_url: String,
    /// Application name registered on the server
    pub app_name: String,
    /// User the remote sessions are created for
    pub user_id: String,
    /// Request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            app_name: "damnvulnerableadk".to_string(),
            user_id: "1".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl RemoteConfig {
    /// Create configuration for a server and app
    pub fn new(base_url: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    /// Set the remote user id
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
