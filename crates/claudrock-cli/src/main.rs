// Binary entry point for claudrock

mod args;
mod client;
mod commands;
mod config;
mod constants;
mod family;
mod output;
mod spinner;

use anyhow::Result;
use args::{Cli, CliConfig};
use clap::Parser;
use commands::Commands;
use constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use output::OutputLevel;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        output::error(&format!("{err:#}"), OutputLevel::Normal);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` switches library logs to debug
fn init_logging(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse CLI arguments, load configuration and dispatch to the requested
/// sub-command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cli_config = CliConfig::load()?;
    let output_level = OutputLevel::from_flags(cli.quiet, cli.verbose);

    match &cli.command {
        Commands::Chat(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Image(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Code(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Converse(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Reason(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Write(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Compare(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Recommend(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Models(args) => args.run(output_level, &mut cli_config, &cli).await,
        Commands::Info(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::Completions(args) => args.run(output_level, &cli_config, &cli).await,
        Commands::SmokeTest(args) => args.run(output_level, &cli_config, &cli).await,
    }
}
