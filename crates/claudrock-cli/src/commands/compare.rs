use anyhow::{Result, bail};
use clap::Args;
use claudrock_core::{DEFAULT_COMPARISON_MODELS, ModelComparison};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::usage_summary,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct CompareArgs {
    /// Prompt sent to every model
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// Comma-separated short names (default: haiku,sonnet3.5,sonnet4,opus4)
    #[arg(short, long, value_delimiter = ',')]
    pub models: Vec<String>,
}

impl CompareArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let claude = client::claude4(cli, cli_config)?;
        let names: Vec<&str> = self.models.iter().map(String::as_str).collect();
        let models = (!names.is_empty()).then_some(names.as_slice());

        let count = models.map_or(DEFAULT_COMPARISON_MODELS.len(), distinct_count);
        output::progress(&format!("Comparing {count} models"), output_level);
        let comparison = claude.compare_models(&self.prompt, models).await;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            print_comparison(&comparison, output_level);
        }
        check_any_succeeded(&comparison)
    }
}

fn distinct_count(models: &[&str]) -> usize {
    let mut seen: Vec<&str> = Vec::with_capacity(models.len());
    for &model in models {
        if !seen.contains(&model) {
            seen.push(model);
        }
    }
    seen.len()
}

/// A comparison where every model failed is a failed command
fn check_any_succeeded(comparison: &ModelComparison) -> Result<()> {
    let total = comparison.comparisons.len();
    if total > 0 && comparison.comparisons.values().all(|entry| entry.is_error()) {
        bail!("all {total} models failed");
    }
    Ok(())
}

fn print_comparison(comparison: &ModelComparison, output_level: OutputLevel) {
    for (model, entry) in &comparison.comparisons {
        let label = match entry.model_info {
            Some(info) => format!("{} ({}, {})", output::format_model(model), info.generation, info.cost),
            None => output::format_model(model),
        };

        if entry.is_error() {
            output::error(&format!("{label}: {}", entry.response), output_level);
            continue;
        }

        output::heading(&format!("\n{label}"), output_level);
        println!("{}", entry.response);
        if !entry.usage.is_empty() {
            output::detail(&format!("usage: {}", usage_summary(&entry.usage)), output_level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claudrock_core::{ChatReply, ComparisonEntry, Failure, LlmError, Outcome, Usage};
    use std::collections::BTreeMap;

    fn ok_entry() -> ComparisonEntry {
        ComparisonEntry::from_result(
            Outcome::Success(ChatReply {
                response: "hi".to_string(),
                model_used: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
                model_generation: None,
                usage: Usage::new(),
                conversation_length: None,
                timestamp: chrono::Local::now(),
            }),
            None,
        )
    }

    fn failed_entry() -> ComparisonEntry {
        let failure = Failure::new(&LlmError::authentication("expired token"), "model-x");
        ComparisonEntry::from_result(Outcome::Failure(failure), None)
    }

    fn comparison(entries: Vec<(&str, ComparisonEntry)>) -> ModelComparison {
        ModelComparison {
            prompt: "hello".to_string(),
            comparisons: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect::<BTreeMap<_, _>>(),
            timestamp: chrono::Local::now(),
        }
    }

    #[test]
    fn test_all_failed_comparison_is_an_error() {
        let result = check_any_succeeded(&comparison(vec![
            ("haiku", failed_entry()),
            ("sonnet4", failed_entry()),
        ]));
        assert_eq!(result.unwrap_err().to_string(), "all 2 models failed");
    }

    #[test]
    fn test_partial_failure_still_succeeds() {
        assert!(
            check_any_succeeded(&comparison(vec![
                ("haiku", ok_entry()),
                ("opus4", failed_entry()),
            ]))
            .is_ok()
        );
        assert!(check_any_succeeded(&comparison(vec![])).is_ok());
    }

    #[test]
    fn test_distinct_count_ignores_repeats() {
        assert_eq!(distinct_count(&["haiku", "haiku", "sonnet4"]), 2);
        assert_eq!(distinct_count(&[]), 0);
    }
}
