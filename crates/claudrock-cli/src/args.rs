use anyhow::{Result, anyhow};
use etcetera::BaseStrategy;
use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;
use crate::config::{self, Config};
use crate::constants::BINARY_NAME;
use crate::family::Family;

// Example strings for after_long_help
const CLI_EXAMPLES: &str = r#"EXAMPLES:
  claudrock chat "What is Rust?"                      # Chat with the default model
  claudrock -f claude3 chat -m sonnet "Explain CRDTs"  # Claude 3.5 Sonnet through the smaller client
  claudrock image photo.jpg --depth expert            # Expert image analysis with Claude Opus 4
  claudrock code "An LRU cache" -l rust               # Code generation
  claudrock compare "Define entropy" -m haiku,opus4   # Same prompt, several models
  claudrock --json reason "Is P = NP?" --type logical # Machine-readable result
  claudrock smoke-test                                # Check region and credentials end to end"#;

pub struct CliConfig {
    pub config_base_path: PathBuf,
    pub config: Config,
}

impl CliConfig {
    pub fn load() -> Result<Self> {
        let strategy = etcetera::choose_base_strategy()
            .map_err(|_| anyhow!("could not determine the home directory"))?;

        let config_base_path = strategy.config_dir().join(BINARY_NAME);
        let config = config::Config::load(&config_base_path)?;

        Ok(Self {
            config_base_path,
            config,
        })
    }
}

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Claude models on Amazon Bedrock from the command line")]
#[command(name = BINARY_NAME)]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Client family for chat, image and code commands
    #[arg(short, long, global = true, value_enum)]
    pub family: Option<Family>,

    /// AWS region hosting the Bedrock runtime
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Runtime endpoint override (VPC endpoint, proxy or local mock)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print the full result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (model ids, usage, debug logs)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Quiet output (only show errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// `--family` if given, else the configured family
    pub fn family(&self, cli_config: &CliConfig) -> Family {
        self.family.unwrap_or(cli_config.config.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "claudrock", "chat", "hello", "--family", "claude3", "--json", "--region", "eu-central-1",
        ])
        .unwrap();

        assert_eq!(cli.family, Some(Family::Claude3));
        assert!(cli.json);
        assert_eq!(cli.region.as_deref(), Some("eu-central-1"));
        assert!(matches!(cli.command, Commands::Chat(_)));
    }

    #[test]
    fn test_family_falls_back_to_config() {
        let cli = Cli::try_parse_from(["claudrock", "recommend", "coding"]).unwrap();
        let cli_config = CliConfig {
            config_base_path: PathBuf::from("/tmp/claudrock"),
            config: Config {
                family: Family::Claude3,
                ..Config::default()
            },
        };

        assert_eq!(cli.family(&cli_config), Family::Claude3);
    }

    #[test]
    fn test_unknown_family_rejected() {
        assert!(Cli::try_parse_from(["claudrock", "-f", "claude5", "chat", "hi"]).is_err());
    }
}
