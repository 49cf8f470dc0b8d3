use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use crate::{
    args::{Cli, CliConfig},
    constants::BINARY_NAME,
    output::OutputLevel,
};

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    pub async fn run(
        &self,
        _output_level: OutputLevel,
        _cli_config: &CliConfig,
        _cli: &Cli,
    ) -> Result<()> {
        generate(self.shell, &mut Cli::command(), BINARY_NAME, &mut io::stdout());
        Ok(())
    }
}
