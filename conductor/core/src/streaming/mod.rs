//! Stream Decoding
//!
//! The answering agent replies with server-sent-event framing even when
//! streaming is switched off: one body holding several `data: <json>` frames.
//! This module reduces such a body to a single canonical answer.
//!
//! # Framing
//!
//! ```text
//! data: {"content":{"parts":[{"functionCall":{...}}]}}
//!
//! data: {"content":{"parts":[{"functionResponse":{...}}]}}
//!
//! data: {"content":{"parts":[{"text":"john_doe is 30 years old."}]}}   <-- answer
//! ```
//!
//! Partial or non-JSON frames (keep-alives, truncated writes) are skipped
//! rather than failing the whole decode.
//!
//! # Example
//!
//! ```
//! use relay_core::streaming::{decode_sse_body, StreamOutcome};
//!
//! let body = "data: {\"content\":{\"parts\":[{\"text\":\"hi\"}]}}\n\n";
//! assert_eq!(decode_sse_body(body).text(), Some("hi"));
//! ```

mod sse;

pub use sse::{assistant_text, decode_sse_body, split_frames, StreamOutcome, FRAME_DELIMITER};
