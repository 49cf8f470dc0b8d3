use anyhow::Result;
use clap::Args;
use claudrock_core::{Claude4Client, ClaudeClient};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    family::Family,
    output::OutputLevel,
    spinner::spin_while,
};

#[derive(Args)]
pub struct ChatArgs {
    /// The prompt to send
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// Short model name (defaults to the configured model of the family)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output-token budget (4000 for claude3, 8000 for claude4)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(short, long, default_value_t = ClaudeClient::DEFAULT_TEMPERATURE)]
    pub temperature: f32,
}

impl ChatArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let family = cli.family(cli_config);
        let model = self
            .model
            .as_deref()
            .unwrap_or_else(|| cli_config.config.default_model(family));

        match family {
            Family::Claude3 => {
                let claude = client::claude3(cli, cli_config)?;
                let max_tokens = self.max_tokens.unwrap_or(ClaudeClient::DEFAULT_MAX_TOKENS);
                let result = spin_while(
                    "Thinking",
                    output_level,
                    claude.chat(&self.prompt, model, max_tokens, self.temperature),
                )
                .await;
                report(&result, cli.json, output_level)
            }
            Family::Claude4 => {
                let claude = client::claude4(cli, cli_config)?;
                let max_tokens = self.max_tokens.unwrap_or(Claude4Client::DEFAULT_MAX_TOKENS);
                let result = spin_while(
                    "Thinking",
                    output_level,
                    claude.chat(&self.prompt, model, max_tokens, self.temperature),
                )
                .await;
                report(&result, cli.json, output_level)
            }
        }
    }
}
