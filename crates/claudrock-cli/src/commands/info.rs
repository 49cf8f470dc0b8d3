use anyhow::Result;
use clap::Args;
use claudrock_core::ProviderConfig;

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::env_var_status,
    constants::CONFIG_FILE_NAME,
    output::{self, OutputLevel},
};

const ENV_VARS: [&str; 8] = [
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "BEDROCK_BASE_URL",
    "AWS_BEARER_TOKEN_BEDROCK",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_PROFILE",
];

#[derive(Args)]
pub struct InfoArgs {}

impl InfoArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let config_path = cli_config.config_base_path.join(CONFIG_FILE_NAME);
        output::note(
            &format!("config file: {}", config_path.display()),
            output_level,
        );

        let bedrock = client::bedrock_config(cli, cli_config)?;
        output::heading("\nBedrock:", output_level);
        output::note(&format!("family: {}", cli.family(cli_config)), output_level);
        output::note(&format!("region: {}", bedrock.region), output_level);
        output::note(&format!("endpoint: {}", bedrock.base_url()), output_level);
        if let Some(timeout) = bedrock.timeout() {
            output::note(&format!("timeout: {}s", timeout.as_secs()), output_level);
        }

        output::heading("\nEnv Vars:", output_level);
        for var in ENV_VARS {
            output::note(&format!("{var} = {}", env_var_status(var)), output_level);
        }

        output::heading("\nVersion info:", output_level);
        output::note(
            &format!("version: {}", env!("CARGO_PKG_VERSION")),
            output_level,
        );

        Ok(())
    }
}
