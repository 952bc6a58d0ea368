//! SSE body decoding
//!
//! Turns a fully buffered `data: <json>` body into one [`StreamOutcome`].

use serde_json::Value;
use tracing::debug;

/// Literal token that starts every frame
pub const FRAME_DELIMITER: &str = "data: ";

/// Result of decoding one streamed response body
#[derive(Clone, Debug, PartialEq)]
pub enum StreamOutcome {
    /// A frame carried an assistant text answer
    Success {
        /// The answer text
        text: String,
        /// The frame the text was taken from
        raw_payload: Value,
    },
    /// No frame carried assistant text
    SuccessNoText {
        /// Every non-empty fragment of the body, parsable or not
        chunks: Vec<String>,
    },
}

impl StreamOutcome {
    /// Answer text, if the stream carried one
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::SuccessNoText { .. } => None,
        }
    }

    /// Status reported alongside the outcome; both variants are successes
    #[must_use]
    pub fn status(&self) -> &'static str {
        "success"
    }
}

/// Split a body into trimmed, non-empty frame fragments
pub fn split_frames(body: &str) -> Vec<String> {
    body.split(FRAME_DELIMITER)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(String::from)
        .collect()
}

/// Assistant text of a parsed frame (`content.parts[0].text`), if non-empty
pub fn assistant_text(frame: &Value) -> Option<&str> {
    frame
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Decode a streamed response body
///
/// Fragments that are not valid JSON are skipped. The last frame in stream
/// order that carries assistant text wins.
pub fn decode_sse_body(body: &str) -> StreamOutcome {
    let chunks = split_frames(body);

    for chunk in chunks.iter().rev() {
        let frame: Value = match serde_json::from_str(chunk) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(error = %e, len = chunk.len(), "Skipping unparsable SSE frame");
                continue;
            }
        };

        if let Some(text) = assistant_text(&frame) {
            return StreamOutcome::Success {
                text: text.to_string(),
                raw_payload: frame,
            };
        }
    }

    debug!(frames = chunks.len(), "SSE body carried no assistant text");
    StreamOutcome::SuccessNoText { chunks }
}
