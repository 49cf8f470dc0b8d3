use thiserror::Error;

/// Main error type for the client library
///
/// Public client operations never return this directly: they fold it into
/// the failure variant of their result. It is exposed for callers using the
/// [`ModelInvoker`](crate::types::ModelInvoker) seam or the configuration API.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network-related errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication errors (rejected or missing credentials)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Throttling errors
    #[error("Rate limit exceeded: {message}. Retry after: {retry_after:?}")]
    RateLimit {
        message: String,
        retry_after: Option<std::time::Duration>,
    },

    /// Errors reported by the model-invocation service
    #[error("API error from {provider}: {message} (code: {code:?})")]
    Api {
        provider: String,
        message: String,
        code: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization/deserialization errors, including unexpected response shapes
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Local I/O errors (reading image files)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Provider service unavailable
    #[error("Service unavailable: {provider} is currently unavailable")]
    ServiceUnavailable { provider: String },
}

impl LlmError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a rate limit error
    pub fn rate_limit(
        message: impl Into<String>,
        retry_after: Option<std::time::Duration>,
    ) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Create an API error
    pub fn api(
        provider: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
            code,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a serialization error for a response that parsed as JSON but
    /// does not have the expected shape
    pub fn invalid_response(message: impl Into<String>, detail: &str) -> Self {
        Self::serialization(
            message,
            std::io::Error::new(std::io::ErrorKind::InvalidData, detail.to_string()),
        )
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(provider: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            provider: provider.into(),
        }
    }
}

/// Convert from reqwest errors
impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::network_with_source("Request timed out", err)
        } else if err.is_connect() {
            LlmError::network_with_source("Connection failed", err)
        } else if err.is_decode() {
            LlmError::serialization("Failed to decode response body", err)
        } else {
            LlmError::network_with_source("HTTP request failed", err)
        }
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::serialization("JSON serialization failed", err)
    }
}
