use anyhow::Result;
use clap::Args;

use crate::{
    args::{Cli, CliConfig},
    client,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct RecommendArgs {
    /// chat, reasoning, coding, creative, analysis, speed, cost, vision or research
    #[arg(value_name = "TASK")]
    pub task: Option<String>,
}

impl RecommendArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let claude = client::claude4(cli, cli_config)?;
        let recommendation = claude.get_model_recommendations(self.task.as_deref().unwrap_or(""));

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
            return Ok(());
        }

        match &self.task {
            Some(task) => {
                output::detail(&format!("task: {task}"), output_level);
                println!("{}", recommendation.recommendation);
            }
            None => {
                for (task, advice) in &recommendation.all_recommendations {
                    println!("{task:<10} {advice}");
                }
            }
        }
        Ok(())
    }
}
