use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Region used when neither the caller nor the environment supplies one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration trait for model-invocation endpoints
pub trait ProviderConfig: Send + Sync {
    /// Get the region the endpoint lives in
    fn region(&self) -> &str;

    /// Get the base URL for API requests
    fn base_url(&self) -> String;

    /// Get the request timeout, if one was configured
    fn timeout(&self) -> Option<Duration>;

    /// Get the headers sent with every request
    fn headers(&self) -> HashMap<String, String>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), LlmError>;
}

/// Static AWS access keys used for SigV4 signing
#[derive(Clone, PartialEq, Eq)]
pub struct AwsKeys {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsKeys {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl fmt::Debug for AwsKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsKeys")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Amazon Bedrock Runtime configuration
///
/// Requests are authenticated in one of two ways. A bearer token (Bedrock API
/// key) becomes an `Authorization` header and disables signing. Otherwise each
/// request is SigV4-signed, with [`BedrockConfig::aws_keys`] when set and the
/// standard AWS credential chain (environment, shared profile, SSO, container
/// and instance metadata) when not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockConfig {
    pub region: String,
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
    #[serde(skip)]
    pub aws_keys: Option<AwsKeys>,
    pub timeout_seconds: Option<u64>,
    pub headers: HashMap<String, String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl BedrockConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            base_url: None,
            bearer_token: None,
            aws_keys: None,
            timeout_seconds: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_aws_keys(mut self, keys: AwsKeys) -> Self {
        self.aws_keys = Some(keys);
        self
    }

    /// Bearer token, if a non-blank one is set
    pub fn bearer(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

impl ProviderConfig for BedrockConfig {
    fn region(&self) -> &str {
        &self.region
    }

    fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = self.headers.clone();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = self.bearer() {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        headers
    }

    fn validate(&self) -> Result<(), LlmError> {
        if self.region.trim().is_empty() {
            return Err(LlmError::configuration("Region is required"));
        }

        if let Some(base_url) = &self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(LlmError::configuration(
                    "Base URL must be a valid HTTP/HTTPS URL",
                ));
            }
        }

        Ok(())
    }
}

/// Configuration builder for creating configs from environment variables
pub struct ConfigBuilder;

impl ConfigBuilder {
    /// Create Bedrock config from the process environment
    pub fn bedrock_from_env() -> Result<BedrockConfig, LlmError> {
        Self::bedrock_from_lookup(|key| std::env::var(key).ok())
    }

    /// Create Bedrock config from an arbitrary variable lookup.
    ///
    /// Reads `AWS_REGION`, then `AWS_DEFAULT_REGION`, falling back to
    /// [`DEFAULT_REGION`]; `BEDROCK_BASE_URL`; `AWS_BEARER_TOKEN_BEDROCK`.
    /// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` (plus an optional
    /// `AWS_SESSION_TOKEN`) become static signing keys when both are set.
    pub fn bedrock_from_lookup<F>(lookup: F) -> Result<BedrockConfig, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = non_empty("AWS_REGION")
            .or_else(|| non_empty("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut config = BedrockConfig::new(region);

        if let Some(base_url) = non_empty("BEDROCK_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Some(token) = non_empty("AWS_BEARER_TOKEN_BEDROCK") {
            config = config.with_bearer_token(token);
        }

        if let (Some(access_key_id), Some(secret_access_key)) = (
            non_empty("AWS_ACCESS_KEY_ID"),
            non_empty("AWS_SECRET_ACCESS_KEY"),
        ) {
            let mut keys = AwsKeys::new(access_key_id, secret_access_key);
            if let Some(token) = non_empty("AWS_SESSION_TOKEN") {
                keys = keys.with_session_token(token);
            }
            config = config.with_aws_keys(keys);
        }

        config.validate()?;
        Ok(config)
    }
}
