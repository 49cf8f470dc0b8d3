use anyhow::Result;
use clap::{Args, Subcommand};

use crate::{
    args::{Cli, CliConfig},
    family::Family,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub action: ModelsAction,
}

#[derive(Subcommand)]
pub enum ModelsAction {
    /// List the short names of the active family
    List,
    /// Show or set the default chat model of the active family
    Default {
        /// Short model name, e.g. opus4
        model: Option<String>,
    },
}

impl ModelsArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &mut CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let family = cli.family(cli_config);

        match &self.action {
            ModelsAction::List => {
                list_models(family, cli_config, cli.json)?;
            }
            ModelsAction::Default { model: None } => {
                output::note(
                    &format!(
                        "Default {family} model: {}",
                        output::format_model(cli_config.config.default_model(family))
                    ),
                    output_level,
                );
            }
            ModelsAction::Default { model: Some(model) } => {
                set_default_model(family, model, cli_config, output_level)?;
            }
        }
        Ok(())
    }
}

fn list_models(family: Family, cli_config: &CliConfig, json: bool) -> Result<()> {
    let catalog = family.catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        return Ok(());
    }

    let default = cli_config.config.default_model(family);
    for entry in catalog.entries() {
        let marker = if entry.short_name == default { "*" } else { " " };
        match entry.metadata {
            Some(meta) => println!(
                "{marker} {:<10} {:<44} {:<11} {:<9} {}",
                entry.short_name, entry.model_id, meta.generation, meta.cost, meta.best_for
            ),
            None => println!("{marker} {:<10} {}", entry.short_name, entry.model_id),
        }
    }
    Ok(())
}

fn set_default_model(
    family: Family,
    model: &str,
    cli_config: &mut CliConfig,
    output_level: OutputLevel,
) -> Result<()> {
    if !family.catalog().contains(model) {
        output::error(&format!("{model} is not a {family} model"), output_level);
        match Family::owning(model) {
            Some(owner) => output::hint(
                &format!(
                    "it belongs to {owner}; try {}",
                    output::format_command(&format!("claudrock -f {owner} models default {model}"))
                ),
                output_level,
            ),
            None => output::hint(
                &format!("run {} to see the short names", output::format_command("claudrock models list")),
                output_level,
            ),
        }
        anyhow::bail!("unknown model {model}");
    }

    cli_config.config.set_default_model(family, model);
    cli_config.config.save(&cli_config.config_base_path)?;
    output::success(
        &format!("Default {family} model set to {}", output::format_model(model)),
        output_level,
    );
    Ok(())
}
