use serde::{Deserialize, Serialize};

/// System prompt applied when a request is built from a bare question.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise software development assistant. \
Answer briefly and to the point, in markdown. \
For code blocks use triple backticks with a language tag: ```language";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Canonical request payload shape for the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Default: true.
    #[serde(default = "default_true")]
    pub stream: bool,
}

fn default_true() -> bool {
    true
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
        }
    }

    /// Build a streaming request for one user question, with the default
    /// system prompt prepended. Any file context is expected to be merged
    /// into `question` by the caller.
    pub fn chat(model: impl Into<String>, question: impl Into<String>) -> Self {
        Self::new(
            model,
            vec![
                ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
                ChatMessage::user(question),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ChatRequest;

    #[test]
    fn chat_requests_stream_and_carry_both_roles() {
        let request = ChatRequest::chat("glm-4.6", "How do I sort a Vec?");

        assert!(request.stream);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "How do I sort a Vec?");
    }

    #[test]
    fn serializes_to_the_wire_shape() {
        let request = ChatRequest::chat("glm-4.6", "hi");
        let value = serde_json::to_value(&request).expect("request serializes");

        assert_eq!(value["model"], "glm-4.6");
        assert_eq!(value["stream"], true);
        assert!(value["messages"].is_array());
    }
}
