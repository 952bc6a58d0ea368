//! Transcript Store
//!
//! Append-only, per-session conversation logs plus running statistics.
//!
//! # Layout
//!
//! ```text
//! <sessions_dir>/
//! └── session_<id>.txt     header once, then framed entries,
//!                          a stats block after every Nth entry
//! ```
//!
//! The store is the only writer of these files. Statistics live in memory,
//! keyed by session id, and start from zero in every process.
//!
//! Bytes of the session id outside `[A-Za-z0-9_-]` are written as `%XX`, so
//! distinct ids never share a file.
//!
//! Each append runs on its own task. Dropping a pending [`TranscriptStore::record`]
//! future does not interrupt the write or the counter update.

mod format;
mod stats;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::messages::{MessageType, Role, SessionId, TranscriptEntry};

pub use format::{format_entry, format_header, format_stats, wrap_text};
pub use stats::SessionStats;

/// Errors raised while writing transcripts
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Filesystem failure on a log path
    #[error("transcript I/O failed for {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The write task panicked or was aborted
    #[error("transcript write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl TranscriptError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Transcript store configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptConfig {
    /// Directory holding one log file per session
    pub sessions_dir: PathBuf,
    /// Column at which entry text is soft-wrapped
    pub wrap_width: usize,
    /// Write a stats block after every this many entries (0 = never)
    pub stats_every: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from("sessions"),
            wrap_width: 150,
            stats_every: 10,
        }
    }
}

impl TranscriptConfig {
    /// Default configuration rooted at `sessions_dir`
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
            ..Default::default()
        }
    }
}

type StatsMap = Arc<Mutex<HashMap<SessionId, SessionStats>>>;

/// Per-session append-only log with running statistics
pub struct TranscriptStore {
    config: TranscriptConfig,
    stats: StatsMap,
}

impl TranscriptStore {
    /// Open a store, creating the sessions directory if needed
    pub async fn open(config: TranscriptConfig) -> Result<Self, TranscriptError> {
        tokio::fs::create_dir_all(&config.sessions_dir)
            .await
            .map_err(|e| TranscriptError::io(&config.sessions_dir, e))?;

        Ok(Self {
            config,
            stats: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Log file path for a session
    #[must_use]
    pub fn log_path(&self, session_id: &SessionId) -> PathBuf {
        let mut name = String::from("session_");
        for b in session_id.as_str().bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                name.push(char::from(b));
            } else {
                let _ = write!(name, "%{b:02X}");
            }
        }
        name.push_str(".txt");
        self.config.sessions_dir.join(name)
    }

    /// Append an entry and update the session's statistics
    ///
    /// Counters are only committed once the entry reached the file.
    pub async fn record(
        &self,
        session_id: &SessionId,
        role: Role,
        text: &str,
        message_type: MessageType,
        response_time_ms: Option<f64>,
    ) -> Result<TranscriptEntry, TranscriptError> {
        let entry = TranscriptEntry {
            session_id: session_id.clone(),
            role,
            text: text.to_string(),
            message_type,
            timestamp: Local::now(),
            response_time_ms,
        };
        let append = append_entry(
            Arc::clone(&self.stats),
            self.log_path(session_id),
            self.config.clone(),
            entry,
        );
        tokio::spawn(append).await?
    }

    /// Snapshot of a session's statistics
    pub async fn stats(&self, session_id: &SessionId) -> Option<SessionStats> {
        self.stats.lock().await.get(session_id).cloned()
    }
}

async fn append_entry(
    stats_map: StatsMap,
    path: PathBuf,
    config: TranscriptConfig,
    entry: TranscriptEntry,
) -> Result<TranscriptEntry, TranscriptError> {
    let mut all_stats = stats_map.lock().await;
    let session_id = &entry.session_id;

    let mut stats = all_stats
        .get(session_id)
        .cloned()
        .unwrap_or_else(|| SessionStats::new(session_id.clone()));
    stats.record(entry.role);

    let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(|e| TranscriptError::io(&path, e))?;

    let mut block = String::new();
    if !exists {
        block.push_str(&format_header(session_id, &stats.start_time));
    }
    block.push_str(&format_entry(
        entry.role,
        &entry.text,
        &entry.timestamp,
        entry.response_time_ms,
        config.wrap_width,
    ));
    let snapshot = stats.snapshot_due(config.stats_every);
    if snapshot {
        block.push_str(&format_stats(&stats));
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .map_err(|e| TranscriptError::io(&path, e))?;
    file.write_all(block.as_bytes())
        .await
        .map_err(|e| TranscriptError::io(&path, e))?;
    file.flush()
        .await
        .map_err(|e| TranscriptError::io(&path, e))?;

    debug!(
        session_id = %session_id,
        role = entry.role.as_str(),
        message_type = entry.message_type.as_str(),
        count = stats.message_count,
        snapshot,
        "Recorded transcript entry"
    );

    all_stats.insert(session_id.clone(), stats);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_path_sanitizes_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::open(TranscriptConfig::new(dir.path()))
            .await
            .unwrap();

        let path = store.log_path(&SessionId::from("../etc/pass wd"));
        assert_eq!(path, dir.path().join("session_%2E%2E%2Fetc%2Fpass%20wd.txt"));

        let path = store.log_path(&SessionId::from("100%"));
        assert_eq!(path, dir.path().join("session_100%25.txt"));

        let path = store.log_path(&SessionId::from("a1b2-c3_d4"));
        assert_eq!(path, dir.path().join("session_a1b2-c3_d4.txt"));
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("sessions");
        TranscriptStore::open(TranscriptConfig::new(&nested))
            .await
            .unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_record_returns_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::open(TranscriptConfig::new(dir.path()))
            .await
            .unwrap();
        let id = SessionId::from("s1");

        let entry = store
            .record(&id, Role::AgentResponse, "done", MessageType::AgentResponse, Some(12.5))
            .await
            .unwrap();

        assert_eq!(entry.role, Role::AgentResponse);
        assert_eq!(entry.text, "done");
        assert_eq!(entry.response_time_ms, Some(12.5));
        assert_eq!(store.stats(&id).await.unwrap().agent_responses, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_has_no_stats() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::open(TranscriptConfig::new(dir.path()))
            .await
            .unwrap();
        assert!(store.stats(&SessionId::from("never")).await.is_none());
    }
}
