//! SigV4 request signing for Bedrock Runtime.

use crate::config::{AwsKeys, BedrockConfig};
use crate::error::LlmError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SigningParams, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::OnceCell;

/// Service name Bedrock Runtime requests are signed for
pub const SIGNING_NAME: &str = "bedrock";

const STATIC_PROVIDER_NAME: &str = "BedrockConfig";

/// Where request credentials come from
#[derive(Clone)]
pub enum CredentialSource {
    /// A bearer token is configured; requests go out unsigned
    Bearer,
    /// Keys given explicitly in the config
    Static(Credentials),
    /// The standard AWS chain, loaded on first use
    DefaultChain {
        region: String,
        provider: Arc<OnceCell<Option<SharedCredentialsProvider>>>,
    },
}

impl CredentialSource {
    pub fn for_config(config: &BedrockConfig) -> Self {
        if config.bearer().is_some() {
            return Self::Bearer;
        }

        match &config.aws_keys {
            Some(keys) => Self::Static(static_credentials(keys)),
            None => Self::DefaultChain {
                region: config.region.clone(),
                provider: Arc::new(OnceCell::new()),
            },
        }
    }

    /// Credentials for the next request. `None` means send it unsigned.
    pub async fn resolve(&self) -> Result<Option<Credentials>, LlmError> {
        match self {
            Self::Bearer => Ok(None),
            Self::Static(credentials) => Ok(Some(credentials.clone())),
            Self::DefaultChain { region, provider } => {
                let provider = provider
                    .get_or_init(|| load_default_chain(region.clone()))
                    .await;
                let Some(provider) = provider else {
                    log::debug!("No AWS credential provider configured; request left unsigned");
                    return Ok(None);
                };

                match provider.provide_credentials().await {
                    Ok(credentials) => Ok(Some(credentials)),
                    Err(CredentialsError::CredentialsNotLoaded(_)) => {
                        log::debug!("No AWS credentials found; request left unsigned");
                        Ok(None)
                    }
                    Err(e) => Err(LlmError::authentication(format!(
                        "Failed to resolve AWS credentials: {e}"
                    ))),
                }
            }
        }
    }
}

fn static_credentials(keys: &AwsKeys) -> Credentials {
    Credentials::new(
        keys.access_key_id.clone(),
        keys.secret_access_key.clone(),
        keys.session_token.clone(),
        None,
        STATIC_PROVIDER_NAME,
    )
}

async fn load_default_chain(region: String) -> Option<SharedCredentialsProvider> {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .load()
        .await
        .credentials_provider()
}

/// Sign a POST and return the headers to add to it
/// (`authorization`, `x-amz-date`, and `x-amz-security-token` for session keys).
pub fn sign_request(
    credentials: Credentials,
    region: &str,
    url: &str,
    headers: &HashMap<String, String>,
    body: &[u8],
    time: SystemTime,
) -> Result<Vec<(String, String)>, LlmError> {
    let identity = credentials.into();
    let params: SigningParams<'_> = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SIGNING_NAME)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| LlmError::authentication(format!("Invalid signing parameters: {e}")))?
        .into();

    let request = SignableRequest::new(
        "POST",
        url,
        headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        SignableBody::Bytes(body),
    )
    .map_err(|e| LlmError::authentication(format!("Request cannot be signed: {e}")))?;

    let (instructions, _signature) = sign(request, &params)
        .map_err(|e| LlmError::authentication(format!("Signing failed: {e}")))?
        .into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}
