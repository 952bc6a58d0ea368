//! Configuration
//!
//! TOML configuration for the relay, layered as
//! defaults < file < environment < explicit overrides (CLI flags).
//!
//! ```toml
//! [remote]
//! base_url = "http://localhost:8000"
//! app_name = "damnvulnerableadk"
//! user_id = "1"
//! timeout_secs = 120
//!
//! [transcript]
//! sessions_dir = "sessions"
//! wrap_width = 150
//! stats_every = 10
//!
//! [agent]
//! relay_tool = "ask_llm_agent"
//! app_name = "robot"
//! user_id = "user"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::DEFAULT_RELAY_TOOL;
use crate::backend::RemoteConfig;
use crate::conductor::ConductorConfig;
use crate::transcript::TranscriptConfig;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Where the effective configuration came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file was found; built-in defaults were used
    Defaults,
    /// Loaded from this file
    File(PathBuf),
}

/// `[remote]` section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// Base URL of the agent API server
    pub base_url: String,
    /// Application name on the remote server
    pub app_name: String,
    /// Remote user id
    pub user_id: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteSection {
    fn default() -> Self {
        let remote = RemoteConfig::default();
        Self {
            base_url: remote.base_url,
            app_name: remote.app_name,
            user_id: remote.user_id,
            timeout_secs: remote.timeout.as_secs(),
        }
    }
}

/// `[transcript]` section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSection {
    /// Directory for session logs
    pub sessions_dir: PathBuf,
    /// Soft-wrap column
    pub wrap_width: usize,
    /// Stats block interval in entries
    pub stats_every: u64,
}

impl Default for TranscriptSection {
    fn default() -> Self {
        let transcript = TranscriptConfig::default();
        Self {
            sessions_dir: transcript.sessions_dir,
            wrap_width: transcript.wrap_width,
            stats_every: transcript.stats_every,
        }
    }
}

/// `[agent]` section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// Tool name the relay is exposed under
    pub relay_tool: String,
    /// App name of the local session
    pub app_name: String,
    /// User id of the local session
    pub user_id: String,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            relay_tool: DEFAULT_RELAY_TOOL.to_string(),
            app_name: "robot".to_string(),
            user_id: "user".to_string(),
        }
    }
}

/// Full configuration file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayToml {
    /// Remote answering agent
    pub remote: RemoteSection,
    /// Transcript store
    pub transcript: TranscriptSection,
    /// Local agent loop
    pub agent: AgentSection,
}

/// Explicit overrides, typically from the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Config file to load instead of the default location
    pub config_path: Option<PathBuf>,
    /// Remote base URL
    pub base_url: Option<String>,
    /// Remote app name
    pub app_name: Option<String>,
    /// Remote user id
    pub user_id: Option<String>,
    /// Sessions directory
    pub sessions_dir: Option<PathBuf>,
}

impl RelayToml {
    /// Parse TOML text
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment variables from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment variables from a lookup function
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("API_SERVER_URL") {
            self.remote.base_url = v;
        }
        if let Some(v) = lookup("APP_NAME") {
            self.remote.app_name = v;
        }
        if let Some(v) = lookup("USER_ID") {
            self.remote.user_id = v;
        }
        if let Some(v) = lookup("RELAY_SESSIONS_DIR") {
            self.transcript.sessions_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("RELAY_TOOL_NAME") {
            self.agent.relay_tool = v;
        }
        if let Some(v) = lookup("RELAY_TIMEOUT_SECS") {
            self.remote.timeout_secs = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RELAY_TIMEOUT_SECS".to_string(),
                value: v.clone(),
                reason: "expected a whole number of seconds",
            })?;
        }
        Ok(())
    }

    /// Apply explicit overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = &overrides.base_url {
            self.remote.base_url.clone_from(v);
        }
        if let Some(v) = &overrides.app_name {
            self.remote.app_name.clone_from(v);
        }
        if let Some(v) = &overrides.user_id {
            self.remote.user_id.clone_from(v);
        }
        if let Some(v) = &overrides.sessions_dir {
            self.transcript.sessions_dir.clone_from(v);
        }
    }

    /// Reject values the relay cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.remote.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "remote.base_url".to_string(),
                value: url.clone(),
                reason: "must start with http:// or https://",
            });
        }
        if self.transcript.wrap_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "transcript.wrap_width".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }
        if self.agent.relay_tool.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "agent.relay_tool".to_string(),
                value: self.agent.relay_tool.clone(),
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Relay client settings
    #[must_use]
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(&self.remote.base_url, &self.remote.app_name)
            .with_user_id(&self.remote.user_id)
            .with_timeout(Duration::from_secs(self.remote.timeout_secs))
    }

    /// Transcript store settings
    #[must_use]
    pub fn transcript_config(&self) -> TranscriptConfig {
        TranscriptConfig {
            sessions_dir: self.transcript.sessions_dir.clone(),
            wrap_width: self.transcript.wrap_width,
            stats_every: self.transcript.stats_every,
        }
    }

    /// Conductor settings
    #[must_use]
    pub fn conductor_config(&self) -> ConductorConfig {
        ConductorConfig {
            relay_tool: self.agent.relay_tool.clone(),
        }
    }
}

/// Default config file location (`<config dir>/a2a-relay/config.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("a2a-relay").join("config.toml"))
}

/// Load a config file
pub async fn load_config_from_path(path: &Path) -> Result<RelayToml, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    RelayToml::parse(&text, path)
}

/// Load the effective configuration
///
/// An explicitly given file must exist; the default location is optional.
pub async fn load_config(
    overrides: &ConfigOverrides,
) -> Result<(RelayToml, ConfigSource), ConfigError> {
    let (mut config, source) = match &overrides.config_path {
        Some(path) => (load_config_from_path(path).await?, ConfigSource::File(path.clone())),
        None => match default_config_path() {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => {
                (load_config_from_path(&path).await?, ConfigSource::File(path))
            }
            _ => (RelayToml::default(), ConfigSource::Defaults),
        },
    };

    config.apply_env()?;
    config.apply_overrides(overrides);
    config.validate()?;

    Ok((config, source))
}
