//! Wire types for the Anthropic-on-Bedrock messages schema
//!
//! These mirror the body accepted by the `InvokeModel` endpoint: a protocol
//! version, a token budget, a temperature and a list of messages whose content
//! is either plain text or a list of typed blocks.

use crate::error::LlmError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Protocol version sent verbatim in every request body
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Provider-reported usage counts, kept opaque
pub type Usage = serde_json::Map<String, serde_json::Value>;

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,

    /// The content of the message
    pub content: MessageContent,
}

impl Message {
    /// Create a plain-text user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a plain-text assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user message made of content blocks
    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Blocks(blocks),
        }
    }
}

/// Role of the message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message (model response)
    Assistant,
}

/// Message content can be text or array of content blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Array of content blocks (for multimodal inputs)
    Blocks(Vec<ContentBlock>),
}

/// A block of content within a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text content
    Text { text: String },
    /// Image content
    Image { source: ImageSource },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn base64_image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Image {
            source: ImageSource::Base64 {
                media_type: media_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Image source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Base64-encoded image
    Base64 { media_type: String, data: String },
}

/// Request body for a single model invocation
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub anthropic_version: &'static str,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens,
            messages,
            temperature,
        }
    }

    /// Encode the request as the JSON body expected by the endpoint
    pub fn to_body(&self) -> Result<Bytes, LlmError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

/// The parts of a response body the clients care about
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

impl Completion {
    /// Decode a response body.
    ///
    /// The text is taken from the first content block; `usage` is optional
    /// and defaults to an empty object.
    pub fn from_body(body: &[u8]) -> Result<Self, LlmError> {
        let response: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
            LlmError::serialization("Failed to parse model response as JSON", e)
        })?;

        let content = response["content"].as_array().ok_or_else(|| {
            LlmError::invalid_response("Missing 'content' in model response", "Invalid response format")
        })?;

        let first = content.first().ok_or_else(|| {
            LlmError::invalid_response("No content blocks in model response", "Empty content array")
        })?;

        let text = first["text"].as_str().ok_or_else(|| {
            LlmError::invalid_response("Missing text in first content block", "Missing text field")
        })?;

        let usage = response
            .get("usage")
            .and_then(|u| u.as_object())
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            text: text.to_string(),
            usage,
        })
    }
}

/// Seam over the remote model-invocation call.
///
/// Implementations accept a model identifier and a JSON-encoded body and
/// return the JSON-encoded response body, or fail with any transport or
/// service error.
#[async_trait::async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Canonical name of the backing service (e.g. "bedrock")
    fn name(&self) -> &'static str;

    /// Invoke a model with an encoded request body
    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_body_shape() {
        let request = ChatRequest::new(vec![Message::user("hello")], 4000, 0.7);
        let body: serde_json::Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();

        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hello"}]));
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_image_block_shape() {
        let message = Message::user_blocks(vec![
            ContentBlock::text("What is this?"),
            ContentBlock::base64_image("image/png", "aGVsbG8="),
        ]);
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is this?"},
                    {
                        "type": "image",
                        "source": {"type": "base64", "media_type": "image/png", "data": "aGVsbG8="}
                    }
                ]
            })
        );
    }

    #[test]
    fn test_messages_deserialize_from_caller_json() {
        let messages: Vec<Message> = serde_json::from_value(json!([
            {"role": "user", "content": "Hi"},
            {"role": "assistant", "content": "Hello!"},
            {"role": "user", "content": [{"type": "text", "text": "Again"}]}
        ]))
        .unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], Message::assistant("Hello!"));
        assert_eq!(
            messages[2].content,
            MessageContent::Blocks(vec![ContentBlock::text("Again")])
        );
    }

    #[test]
    fn test_completion_from_body() {
        let body = br#"{"content":[{"type":"text","text":"pong"}],"usage":{"input_tokens":1,"output_tokens":1}}"#;
        let completion = Completion::from_body(body).unwrap();

        assert_eq!(completion.text, "pong");
        assert_eq!(completion.usage["input_tokens"], 1);
        assert_eq!(completion.usage["output_tokens"], 1);
    }

    #[test]
    fn test_completion_without_usage() {
        let completion = Completion::from_body(br#"{"content":[{"text":"ok"}]}"#).unwrap();
        assert!(completion.usage.is_empty());
    }

    #[test]
    fn test_completion_rejects_unexpected_shapes() {
        for body in [
            &b"not json"[..],
            &br#"{"usage":{}}"#[..],
            &br#"{"content":[]}"#[..],
            &br#"{"content":[{"type":"tool_use"}]}"#[..],
        ] {
            let err = Completion::from_body(body).unwrap_err();
            assert!(matches!(err, LlmError::Serialization { .. }), "{err}");
        }
    }
}
