use anyhow::Result;
use clap::Args;
use claudrock_core::{Claude4Client, ClaudeClient, CodeComplexity};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    family::Family,
    output::{self, OutputLevel},
    spinner::spin_while,
};

#[derive(Args)]
pub struct CodeArgs {
    /// What the code should do
    #[arg(value_name = "DESCRIPTION")]
    pub description: String,

    /// Target language
    #[arg(short, long, default_value = ClaudeClient::DEFAULT_LANGUAGE)]
    pub language: String,

    /// simple, standard, advanced or expert (claude4 only)
    #[arg(short, long)]
    pub complexity: Option<String>,

    /// Short model name (sonnet for claude3, sonnet4 for claude4)
    #[arg(short, long)]
    pub model: Option<String>,
}

impl CodeArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        match cli.family(cli_config) {
            Family::Claude3 => {
                if self.complexity.is_some() {
                    output::warning(
                        "--complexity is ignored by the claude3 client",
                        output_level,
                    );
                }
                let claude = client::claude3(cli, cli_config)?;
                let model = self
                    .model
                    .as_deref()
                    .unwrap_or(ClaudeClient::DEFAULT_CODE_MODEL);
                let result = spin_while(
                    "Writing code",
                    output_level,
                    claude.generate_code(&self.description, &self.language, model),
                )
                .await;
                report(&result, cli.json, output_level)
            }
            Family::Claude4 => {
                let claude = client::claude4(cli, cli_config)?;
                let model = self
                    .model
                    .as_deref()
                    .unwrap_or(Claude4Client::DEFAULT_CODE_MODEL);
                let complexity = self
                    .complexity
                    .as_deref()
                    .map(CodeComplexity::from_key)
                    .unwrap_or_default();
                let result = spin_while(
                    "Writing code",
                    output_level,
                    claude.generate_code(&self.description, &self.language, complexity, model),
                )
                .await;
                report(&result, cli.json, output_level)
            }
        }
    }
}
