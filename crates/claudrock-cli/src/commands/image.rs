use anyhow::Result;
use clap::Args;
use claudrock_core::{AnalysisDepth, Claude4Client, ClaudeClient};
use std::path::PathBuf;

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    family::Family,
    output::{self, OutputLevel},
    spinner::spin_while,
};

#[derive(Args)]
pub struct ImageArgs {
    /// Image file (png, jpg, jpeg, gif or webp)
    #[arg(value_name = "IMAGE")]
    pub path: PathBuf,

    /// What to ask about the image
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Short model name (sonnet for claude3, opus4 for claude4)
    #[arg(short, long)]
    pub model: Option<String>,

    /// standard, detailed or expert (claude4 only)
    #[arg(short, long)]
    pub depth: Option<String>,
}

impl ImageArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        match cli.family(cli_config) {
            Family::Claude3 => {
                if self.depth.is_some() {
                    output::warning("--depth is ignored by the claude3 client", output_level);
                }
                let claude = client::claude3(cli, cli_config)?;
                let prompt = self
                    .prompt
                    .as_deref()
                    .unwrap_or(ClaudeClient::DEFAULT_IMAGE_PROMPT);
                let model = self
                    .model
                    .as_deref()
                    .unwrap_or(ClaudeClient::DEFAULT_IMAGE_MODEL);
                let result = spin_while(
                    "Looking",
                    output_level,
                    claude.analyze_image(&self.path, prompt, model),
                )
                .await;
                report(&result, cli.json, output_level)
            }
            Family::Claude4 => {
                let claude = client::claude4(cli, cli_config)?;
                let prompt = self
                    .prompt
                    .as_deref()
                    .unwrap_or(Claude4Client::DEFAULT_IMAGE_PROMPT);
                let model = self
                    .model
                    .as_deref()
                    .unwrap_or(Claude4Client::DEFAULT_IMAGE_MODEL);
                let depth = self
                    .depth
                    .as_deref()
                    .map(AnalysisDepth::from_key)
                    .unwrap_or_default();
                let result = spin_while(
                    "Looking",
                    output_level,
                    claude.analyze_image(&self.path, prompt, depth, model),
                )
                .await;
                report(&result, cli.json, output_level)
            }
        }
    }
}
