//! LLM request/response types for docschat.
//!
//! These types model the data shapes for chat-completion interactions:
//! conversation messages, completion requests, streamed fragments, and
//! provider errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a chat completion.
///
/// Serializes directly to the OpenAI-compatible wire shape:
/// `{model, messages, max_tokens, temperature, stream}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// One item of a streamed answer.
///
/// `Text` fragments are never empty; concatenating them in arrival order
/// reconstructs the full answer. `Error` is always the last item of a
/// stream and carries a human-readable message for the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StreamFragment {
    Text(String),
    Error(String),
}

impl StreamFragment {
    /// The text payload, if this is a content fragment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StreamFragment::Text(text) => Some(text),
            StreamFragment::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamFragment::Error(_))
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request could not be built.
    #[error("Error preparing request: {0}")]
    Request(String),

    /// The request never got a response.
    #[error("Error sending request: {0}")]
    Transport(String),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body failed mid-read.
    #[error("Error reading stream: {0}")]
    Stream(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("no response from LLM")]
    NoChoices,
}

/// An entry from the provider's model catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub context_length: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        let err = "tool".parse::<MessageRole>().unwrap_err();
        assert!(err.contains("tool"));
    }

    #[test]
    fn test_message_serializes_to_wire_shape() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_request_omits_stream_when_false() {
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![Message::system("s")],
            max_tokens: 1024,
            temperature: 0.7,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("stream").is_none());
        assert_eq!(json["max_tokens"], 1024);

        let streaming = CompletionRequest {
            stream: true,
            ..request
        };
        let json = serde_json::to_value(&streaming).unwrap();
        assert_eq!(json["stream"], true);
    }

    #[test]
    fn test_stream_fragment_accessors() {
        let text = StreamFragment::Text("abc".to_string());
        let error = StreamFragment::Error("boom".to_string());
        assert_eq!(text.as_text(), Some("abc"));
        assert!(!text.is_error());
        assert_eq!(error.as_text(), None);
        assert!(error.is_error());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 503: overloaded"
        );
        assert_eq!(LlmError::NoChoices.to_string(), "no response from LLM");
        assert_eq!(
            LlmError::Transport("connection refused".to_string()).to_string(),
            "Error sending request: connection refused"
        );
    }

    #[test]
    fn test_model_info_optional_fields() {
        let info: ModelInfo = serde_json::from_str(r#"{"id":"openai/gpt-4o"}"#).unwrap();
        assert_eq!(info.id, "openai/gpt-4o");
        assert!(info.name.is_none());
        assert!(info.context_length.is_none());
    }
}
