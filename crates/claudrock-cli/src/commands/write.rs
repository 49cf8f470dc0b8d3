use anyhow::Result;
use clap::Args;
use claudrock_core::{Claude4Client, WritingLength, WritingStyle};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    output::{self, OutputLevel},
    spinner::spin_while,
};

#[derive(Args)]
pub struct WriteArgs {
    /// Subject or premise
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// narrative, poetry, screenplay, academic, business or technical
    #[arg(short, long, default_value = "narrative")]
    pub style: String,

    /// short, medium or long
    #[arg(short, long, default_value = "medium")]
    pub length: String,

    #[arg(short, long, default_value = Claude4Client::DEFAULT_WRITING_MODEL)]
    pub model: String,
}

impl WriteArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let claude = client::claude4(cli, cli_config)?;
        let style = WritingStyle::from_key(self.style.as_str());
        let length = WritingLength::from_key(self.length.as_str());
        output::detail(
            &format!("{style}, {length} ({} tokens)", length.max_tokens()),
            output_level,
        );

        let result = spin_while(
            "Writing",
            output_level,
            claude.creative_writing(&self.prompt, style, length, &self.model),
        )
        .await;
        report(&result, cli.json, output_level)
    }
}
