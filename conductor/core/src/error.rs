//! Turn Errors
//!
//! Everything that can end a user turn early. None of these end the
//! conversation; the caller reports the error and waits for the next input.

use thiserror::Error;

use crate::agent::AgentError;
use crate::transcript::TranscriptError;

/// Reasons a turn was aborted
#[derive(Debug, Error)]
pub enum TurnError {
    /// The agent loop reported a failure (including relay transport errors)
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Writing the transcript failed
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    /// A tool event lacked a field the transcript needs
    #[error("{tool} event is missing `{field}`")]
    MissingField {
        /// Tool the event belongs to
        tool: String,
        /// Name of the absent field
        field: &'static str,
    },
}

impl TurnError {
    /// HTTP status of the upstream failure, if there was one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Agent(AgentError::Relay(e)) => e.status(),
            _ => None,
        }
    }
}
