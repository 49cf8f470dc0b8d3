//! Result values returned by the clients
//!
//! Client operations never return `Err`. They hand back an [`Outcome`] whose
//! failure arm carries the error text, so serialized results keep the
//! "an `error` key means it failed" shape.

use crate::catalog::ModelMetadata;
use crate::error::LlmError;
use crate::prompts::AnalysisDepth;
use crate::types::Usage;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

/// Success or failure of a single client operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

/// Failure arm shared by all operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub error: String,
    pub model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl Failure {
    pub fn new(error: &LlmError, model_used: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            model_used: model_used.into(),
            image_path: None,
            timestamp: Local::now(),
        }
    }

    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }
}

/// Successful chat or conversation turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_generation: Option<String>,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_length: Option<usize>,
    pub timestamp: DateTime<Local>,
}

/// Successful image analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAnalysis {
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_depth: Option<AnalysisDepth>,
    pub model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_generation: Option<String>,
    pub usage: Usage,
    pub image_path: String,
    pub timestamp: DateTime<Local>,
}

pub type ChatResult = Outcome<ChatReply>;
pub type ImageResult = Outcome<ImageAnalysis>;

impl<T> Outcome<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Error description, if the operation failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failure(failure) => Some(&failure.error),
            Outcome::Success(_) => None,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl Outcome<ChatReply> {
    pub fn response(&self) -> Option<&str> {
        self.success().map(|reply| reply.response.as_str())
    }

    pub fn model_used(&self) -> &str {
        match self {
            Outcome::Success(reply) => &reply.model_used,
            Outcome::Failure(failure) => &failure.model_used,
        }
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.success().map(|reply| &reply.usage)
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        match self {
            Outcome::Success(reply) => reply.timestamp,
            Outcome::Failure(failure) => failure.timestamp,
        }
    }
}

impl Outcome<ImageAnalysis> {
    pub fn analysis(&self) -> Option<&str> {
        self.success().map(|analysis| analysis.analysis.as_str())
    }

    pub fn image_path(&self) -> Option<&str> {
        match self {
            Outcome::Success(analysis) => Some(&analysis.image_path),
            Outcome::Failure(failure) => failure.image_path.as_deref(),
        }
    }
}

/// One model's row in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// Reply text, or the error text when the call failed
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelMetadata>,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComparisonEntry {
    pub fn from_result(result: ChatResult, model_info: Option<ModelMetadata>) -> Self {
        match result {
            Outcome::Success(reply) => Self {
                response: reply.response,
                model_info,
                usage: reply.usage,
                error: None,
            },
            Outcome::Failure(failure) => Self {
                response: failure.error.clone(),
                model_info,
                usage: Usage::new(),
                error: Some(failure.error),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Same prompt answered by several models
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelComparison {
    pub prompt: String,
    pub comparisons: BTreeMap<String, ComparisonEntry>,
    pub timestamp: DateTime<Local>,
}

/// Answer to "which model should I use for X"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRecommendation {
    pub task: String,
    pub recommendation: &'static str,
    pub all_recommendations: BTreeMap<&'static str, &'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply() -> ChatReply {
        ChatReply {
            response: "pong".to_string(),
            model_used: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            model_generation: None,
            usage: Usage::new(),
            conversation_length: None,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_success_serializes_without_error_key() {
        let value = serde_json::to_value(ChatResult::Success(reply())).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("error"));
        assert_eq!(object["response"], "pong");
        assert!(object.contains_key("model_used"));
        assert!(!object.contains_key("conversation_length"));

        let timestamp = object["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn test_failure_serializes_with_error_key() {
        let failure = Failure::new(&LlmError::network("connection reset"), "model-x");
        let result: ChatResult = Outcome::Failure(failure);
        assert!(result.is_error());
        assert_eq!(result.model_used(), "model-x");

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["error"], "Network error: connection reset");
        assert!(!object.contains_key("response"));
        assert!(!object.contains_key("image_path"));
    }

    #[test]
    fn test_image_failure_keeps_path() {
        let failure = Failure::new(&LlmError::network("boom"), "model-x").with_image_path("cat.png");
        let result: ImageResult = Outcome::Failure(failure);
        assert_eq!(result.image_path(), Some("cat.png"));
        assert!(result.analysis().is_none());
    }

    #[test]
    fn test_comparison_entry_from_failure_uses_error_text() {
        let failure = Failure::new(&LlmError::authentication("expired token"), "model-x");
        let entry = ComparisonEntry::from_result(Outcome::Failure(failure), None);

        assert!(entry.is_error());
        assert_eq!(entry.response, "Authentication failed: expired token");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "response": "Authentication failed: expired token",
                "usage": {},
                "error": "Authentication failed: expired token"
            })
        );
    }
}
