//! Agent Event Routing
//!
//! Classifies the events of one turn and forwards the ones worth keeping to
//! the transcript store.
//!
//! # Classification
//!
//! ```text
//! ToolCall     { relay tool }   -->  AGENT_TO_AGENT_CALL    (args.message)
//! ToolResponse { relay tool }   -->  AGENT_TO_AGENT_RESULT  (result.text)
//! Text         { is_final }     -->  AGENT_RESPONSE         (ends the turn)
//! anything else                 -->  not recorded
//! ```
//!
//! The feed is consumed one event at a time and never buffered. The first
//! final text event wins; nothing after it is pulled.

mod router;

pub use router::{EventRouter, RoutedAnswer};
