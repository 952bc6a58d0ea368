//! Running per-session statistics

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::messages::{Role, RoleCategory, SessionId};

/// Counters derived from the entries recorded for one session
///
/// Created on the first entry, only ever incremented. Not persisted: a new
/// process starts every session at zero.
#[derive(Clone, Debug)]
pub struct SessionStats {
    /// Session the counters belong to
    pub session_id: SessionId,
    /// Wall-clock time of the first recorded entry
    pub start_time: DateTime<Local>,
    /// All entries
    pub message_count: u64,
    /// `USER` entries
    pub user_messages: u64,
    /// Agent entries, relay calls and results included
    pub agent_responses: u64,
    /// Other tool exchange entries
    pub function_calls: u64,
    /// Entries in no other bucket
    pub other_messages: u64,
    started: Instant,
}

impl SessionStats {
    /// Start counting for a session
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            start_time: Local::now(),
            message_count: 0,
            user_messages: 0,
            agent_responses: 0,
            function_calls: 0,
            other_messages: 0,
            started: Instant::now(),
        }
    }

    /// Count one entry
    pub fn record(&mut self, role: Role) {
        self.message_count += 1;
        match role.category() {
            RoleCategory::User => self.user_messages += 1,
            RoleCategory::Agent => self.agent_responses += 1,
            RoleCategory::Function => self.function_calls += 1,
            RoleCategory::Other => self.other_messages += 1,
        }
    }

    /// Time since the first entry
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether a snapshot is due after the latest entry
    #[must_use]
    pub fn snapshot_due(&self, every: u64) -> bool {
        every > 0 && self.message_count > 0 && self.message_count % every == 0
    }
}
