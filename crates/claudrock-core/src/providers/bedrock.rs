use crate::config::{BedrockConfig, ProviderConfig};
use crate::error::LlmError;
use crate::providers::signing::{self, CredentialSource};
use crate::types::ModelInvoker;
use bytes::Bytes;
use metrics::{counter, histogram};
use reqwest::Client;
use std::time::{Duration, Instant, SystemTime};

const PROVIDER: &str = "bedrock";

/// Bedrock Runtime `InvokeModel` over HTTPS
#[derive(Clone)]
pub struct BedrockRuntime {
    config: BedrockConfig,
    client: Client,
    base_url: String,
    credentials: CredentialSource,
}

impl BedrockRuntime {
    /// Create a new runtime client
    pub fn new(config: BedrockConfig) -> Result<Self, LlmError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url();
        let credentials = CredentialSource::for_config(&config);

        Ok(Self {
            config,
            client,
            base_url,
            credentials,
        })
    }

    /// Create runtime client from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        let config = crate::config::ConfigBuilder::bedrock_from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    /// URL of the invoke endpoint for a model; the identifier is
    /// percent-encoded since it contains `:`
    pub fn invoke_url(&self, model_id: &str) -> String {
        format!(
            "{}/model/{}/invoke",
            self.base_url,
            urlencoding::encode(model_id)
        )
    }
}

#[async_trait::async_trait]
impl ModelInvoker for BedrockRuntime {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn invoke_model(&self, model_id: &str, body: Bytes) -> Result<Bytes, LlmError> {
        let url = self.invoke_url(model_id);
        let start = Instant::now();

        let mut headers = self.config.headers();
        if let Some(credentials) = self.credentials.resolve().await? {
            let signed = signing::sign_request(
                credentials,
                self.config.region(),
                &url,
                &headers,
                &body,
                SystemTime::now(),
            )?;
            headers.extend(signed);
        }

        let mut req = self.client.post(&url);
        for (key, value) in headers {
            req = req.header(key, value);
        }

        let response = req.body(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            counter!("bedrock_invocation_errors_total", "model" => model_id.to_string())
                .increment(1);
            log::debug!(
                "InvokeModel for {model_id} failed with {status} after {:?}",
                start.elapsed()
            );

            return Err(classify_http_error(status.as_u16(), &error_text, retry_after));
        }

        let bytes = response.bytes().await?;
        let elapsed = start.elapsed();

        counter!("bedrock_invocations_total", "model" => model_id.to_string()).increment(1);
        histogram!("bedrock_invocation_latency_ms", "model" => model_id.to_string())
            .record(elapsed.as_millis() as f64);
        log::debug!(
            "InvokeModel for {model_id} returned {} bytes in {elapsed:?}",
            bytes.len()
        );

        Ok(bytes)
    }
}

/// Map a non-2xx response to an error.
///
/// Bedrock error bodies look like `{"message": "..."}`; the message is used
/// when present, otherwise the raw body.
fn classify_http_error(status: u16, body: &str, retry_after: Option<Duration>) -> LlmError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => LlmError::authentication(message),
        429 => LlmError::rate_limit(message, retry_after),
        503 => LlmError::service_unavailable(PROVIDER),
        _ => LlmError::api(
            PROVIDER,
            format!("API Error: {status} - {message}"),
            Some(status.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::config::AwsKeys;
    use wiremock::matchers::{body_json, header, header_exists, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HAIKU: &str = "anthropic.claude-3-haiku-20240307-v1:0";
    const HAIKU_PATH: &str = "/model/anthropic.claude-3-haiku-20240307-v1%3A0/invoke";

    fn runtime_for(server: &MockServer) -> BedrockRuntime {
        BedrockRuntime::new(
            BedrockConfig::default()
                .with_base_url(server.uri())
                .with_bearer_token("test-token"),
        )
        .unwrap()
    }

    #[test]
    fn test_default_invoke_url() {
        let runtime = BedrockRuntime::new(BedrockConfig::new("eu-central-1")).unwrap();
        assert_eq!(
            runtime.invoke_url(HAIKU),
            "https://bedrock-runtime.eu-central-1.amazonaws.com/model/anthropic.claude-3-haiku-20240307-v1%3A0/invoke"
        );
        assert_eq!(runtime.name(), "bedrock");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(BedrockRuntime::new(BedrockConfig::new(" ")).is_err());
    }

    #[tokio::test]
    async fn test_invoke_model_posts_body_and_returns_response() {
        let server = MockServer::start().await;
        let request = json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": 10,
            "messages": [{"role": "user", "content": "ping"}],
            "temperature": 0.5
        });

        Mock::given(method("POST"))
            .and(path(HAIKU_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(header("content-type", "application/json"))
            .and(body_json(request.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "pong"}],
                "usage": {"input_tokens": 1, "output_tokens": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let runtime = runtime_for(&server);
        let body = Bytes::from(serde_json::to_vec(&request).unwrap());
        let response = runtime.invoke_model(HAIKU, body).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(value["content"][0]["text"], "pong");
    }

    #[tokio::test]
    async fn test_error_statuses_are_classified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "3")
                    .set_body_json(json!({"message": "Too many requests, please wait"})),
            )
            .mount(&server)
            .await;

        let runtime = runtime_for(&server);
        let err = runtime
            .invoke_model(HAIKU, Bytes::from_static(b"{}"))
            .await
            .unwrap_err();

        match err {
            LlmError::RateLimit {
                message,
                retry_after,
            } => {
                assert_eq!(message, "Too many requests, please wait");
                assert_eq!(retry_after, Some(Duration::from_secs(3)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_requests_are_signed_with_access_keys() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HAIKU_PATH))
            .and(header_regex(
                "authorization",
                "^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/[0-9]{8}/us-west-2/bedrock/aws4_request",
            ))
            .and(header_exists("x-amz-date"))
            .and(header("x-amz-security-token", "session-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "signed"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let runtime = BedrockRuntime::new(
            BedrockConfig::new("us-west-2")
                .with_base_url(server.uri())
                .with_aws_keys(
                    AwsKeys::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
                        .with_session_token("session-token"),
                ),
        )
        .unwrap();

        let response = runtime
            .invoke_model(HAIKU, Bytes::from_static(b"{}"))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(value["content"][0]["text"], "signed");
    }

    #[tokio::test]
    async fn test_bearer_requests_are_not_signed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .mount(&server)
            .await;

        let runtime = BedrockRuntime::new(
            BedrockConfig::default()
                .with_base_url(server.uri())
                .with_bearer_token("test-token")
                .with_aws_keys(AwsKeys::new("AKIDEXAMPLE", "secret")),
        )
        .unwrap();
        runtime
            .invoke_model(HAIKU, Bytes::from_static(b"{}"))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get("authorization").unwrap(),
            "Bearer test-token"
        );
        assert!(!requests[0].headers.contains_key("x-amz-date"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Bind then release a port so nothing is listening on it
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let runtime = BedrockRuntime::new(
            BedrockConfig::default()
                .with_base_url(format!("http://127.0.0.1:{port}"))
                .with_bearer_token("test-token"),
        )
        .unwrap();

        let err = runtime
            .invoke_model(HAIKU, Bytes::from_static(b"{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Network { .. }), "{err:?}");
    }

    #[test]
    fn test_classify_http_error() {
        assert!(matches!(
            classify_http_error(403, r#"{"message":"The security token included in the request is invalid."}"#, None),
            LlmError::Authentication { .. }
        ));
        assert!(matches!(
            classify_http_error(503, "", None),
            LlmError::ServiceUnavailable { .. }
        ));

        let err = classify_http_error(400, r#"{"message":"Malformed input request"}"#, None);
        assert_eq!(
            err.to_string(),
            "API error from bedrock: API Error: 400 - Malformed input request (code: Some(\"400\"))"
        );

        let err = classify_http_error(500, "upstream exploded", None);
        assert!(err.to_string().contains("upstream exploded"));
    }
}
