use anyhow::{Context, Result};
use claudrock_core::{BedrockConfig, Claude4Client, ClaudeClient, ConfigBuilder, ProviderConfig};

use crate::args::{Cli, CliConfig};

/// Layer flags over `config.toml` over the environment.
///
/// Credentials (bearer token, access keys) only ever come from the environment.
pub fn bedrock_config(cli: &Cli, cli_config: &CliConfig) -> Result<BedrockConfig> {
    let env =
        ConfigBuilder::bedrock_from_env().context("invalid Bedrock settings in the environment")?;
    layer_settings(cli, cli_config, env)
}

fn layer_settings(
    cli: &Cli,
    cli_config: &CliConfig,
    mut config: BedrockConfig,
) -> Result<BedrockConfig> {
    let file = &cli_config.config;

    if let Some(region) = cli.region.as_ref().or(file.region.as_ref()) {
        config.region = region.clone();
    }
    if let Some(base_url) = cli.base_url.as_ref().or(file.base_url.as_ref()) {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = cli.timeout.or(file.timeout_seconds) {
        config = config.with_timeout(timeout);
    }

    tracing::debug!(
        region = %config.region,
        base_url = ?config.base_url,
        bearer_token = config.bearer_token.is_some(),
        access_keys = config.aws_keys.is_some(),
        "resolved Bedrock configuration"
    );
    config.validate().context("invalid Bedrock settings")?;
    Ok(config)
}

pub fn claude3(cli: &Cli, cli_config: &CliConfig) -> Result<ClaudeClient> {
    ClaudeClient::new(bedrock_config(cli, cli_config)?).context("failed to create Claude 3 client")
}

pub fn claude4(cli: &Cli, cli_config: &CliConfig) -> Result<Claude4Client> {
    Claude4Client::new(bedrock_config(cli, cli_config)?).context("failed to create Claude 4 client")
}
