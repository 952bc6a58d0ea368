//! Remote Agent Relay
//!
//! Relay implementation for an agent API server that exposes per-app
//! sessions and an SSE-framed run endpoint.
//!
//! # Remote API
//!
//! - `POST /apps/{app}/users/{user}/sessions` - Create a session, returns `{"id": ...}`
//! - `POST /run_sse` - Run the agent on one message, replies with `data: <json>` frames
//!
//! Every [`AgentRelay::ask`] negotiates a fresh session and then runs the
//! message in it. Sessions are not reused across calls.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info, warn};

use super::traits::{AgentRelay, RelayError, RemoteConfig, FALLBACK_SESSION_ID};
use crate::streaming::{decode_sse_body, StreamOutcome};

/// HTTP relay to the answering agent
#[derive(Clone)]
pub struct RemoteAgentClient {
    /// Connection settings
    config: RemoteConfig,
    /// HTTP client
    http_client: reqwest::Client,
}

impl RemoteAgentClient {
    /// Create a new client
    pub fn new(config: RemoteConfig) -> Result<Self, RelayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Client(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the base URL without a trailing slash
    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Get session creation endpoint URL
    fn sessions_url(&self) -> String {
        format!(
            "{}/apps/{}/users/{}/sessions",
            self.base_url(),
            self.config.app_name,
            self.config.user_id
        )
    }

    /// Get run endpoint URL
    fn run_url(&self) -> String {
        format!("{}/run_sse", self.base_url())
    }

    /// Build the run request body
    fn build_run_request(&self, session_id: &str, message: &str) -> serde_json::Value {
        serde_json::json!({
            "appName": self.config.app_name,
            "userId": self.config.user_id,
            "sessionId": session_id,
            "newMessage": {
                "parts": [{ "text": message }],
                "role": "user",
            },
            "streaming": false,
        })
    }

    /// Negotiate a fresh remote session
    ///
    /// A response without a usable `id` falls back to [`FALLBACK_SESSION_ID`].
    pub async fn create_session(&self) -> Result<String, RelayError> {
        let response = self
            .http_client
            .post(self.sessions_url())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Http { status, body });
        }

        let data: serde_json::Value = response.json().await?;
        let session_id = data
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty());

        match session_id {
            Some(id) => {
                debug!(session_id = id, "Negotiated remote session");
                Ok(id.to_string())
            }
            None => {
                warn!(
                    fallback = FALLBACK_SESSION_ID,
                    "Remote session response has no id, using fallback"
                );
                Ok(FALLBACK_SESSION_ID.to_string())
            }
        }
    }
}

#[async_trait]
impl AgentRelay for RemoteAgentClient {
    fn name(&self) -> &str {
        "remote-agent"
    }

    async fn ask(&self, message: &str) -> Result<StreamOutcome, RelayError> {
        let session_id = self.create_session().await?;
        let request = self.build_run_request(&session_id, message);

        let response = self
            .http_client
            .post(self.run_url())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Http { status, body });
        }

        let body = response.text().await?;
        let outcome = decode_sse_body(&body);

        info!(
            session_id = %session_id,
            bytes = body.len(),
            has_text = outcome.text().is_some(),
            "Relay answered"
        );

        Ok(outcome)
    }
}
