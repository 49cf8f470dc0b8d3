//! Stub model invoker for unit tests
//!
//! Records every call and answers through a caller-supplied handler, so
//! client behavior can be checked without a network.

use crate::error::LlmError;
use crate::types::ModelInvoker;
use bytes::Bytes;
use serde_json::{Value, json};
use std::sync::Mutex;

type Handler = Box<dyn Fn(&str, &Value) -> Result<Value, LlmError> + Send + Sync>;

/// A call observed by [`StubInvoker`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model_id: String,
    pub body: Value,
}

pub struct StubInvoker {
    handler: Handler,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubInvoker {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, LlmError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the given body
    pub fn with_body(body: Value) -> Self {
        Self::new(move |_, _| Ok(body.clone()))
    }

    /// Always answer with a single text block and small usage counts
    pub fn replying(text: &str) -> Self {
        Self::with_body(json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 1, "output_tokens": 1}
        }))
    }

    /// Always fail as if the transport broke
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_, _| Err(LlmError::network(message.clone())))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no calls recorded")
    }
}

#[async_trait::async_trait]
impl ModelInvoker for StubInvoker {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes, LlmError> {
        let body: Value = serde_json::from_slice(&body)?;
        self.calls.lock().unwrap().push(RecordedCall {
            model_id: model_id.to_string(),
            body: body.clone(),
        });

        let response = (self.handler)(model_id, &body)?;
        Ok(Bytes::from(serde_json::to_vec(&response)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_records_calls() {
        let stub = StubInvoker::replying("pong");
        let response = stub
            .invoke_model("model-a", Bytes::from_static(br#"{"max_tokens":5}"#))
            .await
            .unwrap();

        let value: Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(value["content"][0]["text"], "pong");
        assert_eq!(
            stub.calls(),
            vec![RecordedCall {
                model_id: "model-a".to_string(),
                body: json!({"max_tokens": 5}),
            }]
        );
    }

    #[tokio::test]
    async fn test_failing_stub() {
        let stub = StubInvoker::failing("socket closed");
        let err = stub
            .invoke_model("model-a", Bytes::from_static(b"{}"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Network error: socket closed");
        assert_eq!(stub.calls().len(), 1);
    }
}
