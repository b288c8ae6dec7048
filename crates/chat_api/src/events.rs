use serde::{Deserialize, Serialize};

/// Normalized stream event emitted by the decoder.
///
/// A well-formed decode sequence is zero or more `Content` events followed by
/// exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamEvent {
    /// One incremental fragment of the response text. Fragment boundaries are
    /// arbitrary: a fragment may split a word, a markdown token, or a fence.
    Content { delta: String },
    /// The upstream finished the response.
    Done,
    /// The stream failed mid-flight; anything received so far is still valid
    /// partial output.
    Error { detail: String },
}

impl ChatStreamEvent {
    /// Returns true when this event terminates the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::ChatStreamEvent;

    #[test]
    fn terminal_detection_matches_lifecycle() {
        assert!(!ChatStreamEvent::Content {
            delta: "hello".to_string(),
        }
        .is_terminal());
        assert!(ChatStreamEvent::Done.is_terminal());
        assert!(ChatStreamEvent::Error {
            detail: "boom".to_string(),
        }
        .is_terminal());
    }
}
