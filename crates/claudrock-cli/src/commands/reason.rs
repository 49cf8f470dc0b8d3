use anyhow::Result;
use clap::Args;
use claudrock_core::{Claude4Client, ReasoningType};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    output::OutputLevel,
    spinner::spin_while,
};

#[derive(Args)]
pub struct ReasonArgs {
    /// Problem or question to reason about
    #[arg(value_name = "PROBLEM")]
    pub problem: String,

    /// analytical, mathematical, logical or scientific
    #[arg(long = "type", value_name = "TYPE", default_value = "analytical")]
    pub reasoning_type: String,

    #[arg(short, long, default_value = Claude4Client::DEFAULT_REASONING_MODEL)]
    pub model: String,
}

impl ReasonArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let claude = client::claude4(cli, cli_config)?;
        let reasoning_type = ReasoningType::from_key(self.reasoning_type.as_str());

        let result = spin_while(
            &format!("Reasoning ({reasoning_type})"),
            output_level,
            claude.advanced_reasoning(&self.problem, reasoning_type, &self.model),
        )
        .await;
        report(&result, cli.json, output_level)
    }
}
