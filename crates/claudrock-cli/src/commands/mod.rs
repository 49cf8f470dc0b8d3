use anyhow::{Result, anyhow};
use clap::Subcommand;
use claudrock_core::{ChatReply, ImageAnalysis, Outcome, Usage};
use serde::Serialize;

use crate::output::{self, OutputLevel};

pub mod chat;
pub mod code;
pub mod compare;
pub mod completions;
pub mod converse;
pub mod image;
pub mod info;
pub mod models;
pub mod reason;
pub mod recommend;
pub mod write;

pub use chat::ChatArgs;
pub use code::CodeArgs;
pub use compare::CompareArgs;
pub use completions::CompletionsArgs;
pub use converse::ConverseArgs;
pub use image::ImageArgs;
pub use info::InfoArgs;
pub use models::ModelsArgs;
pub use reason::ReasonArgs;
pub use recommend::RecommendArgs;
pub use smoke_test::SmokeTestArgs;
pub use write::WriteArgs;

// Example strings for after_long_help
const CHAT_EXAMPLES: &str = r#"EXAMPLES:
  claudrock chat "Hello!"                         # Default model of the active family
  claudrock chat -m opus4.1 "Plan a migration"    # Pick a model by short name
  claudrock chat --max-tokens 200 -t 0 "Be terse" # Budget and temperature"#;

const IMAGE_EXAMPLES: &str = r#"EXAMPLES:
  claudrock image diagram.png                         # Default prompt
  claudrock image receipt.jpg -p "Total amount?"      # Custom prompt
  claudrock -f claude4 image art.webp --depth expert  # Depth template (claude4 only)"#;

const CODE_EXAMPLES: &str = r#"EXAMPLES:
  claudrock code "Fibonacci up to n terms"                    # Python by default
  claudrock code "A ring buffer" -l rust --complexity expert   # Complexity template (claude4 only)"#;

const CONVERSE_EXAMPLES: &str = r#"EXAMPLES:
  claudrock converse history.json            # [{"role":"user","content":"Hi"}, ...]
  claudrock converse history.json -m sonnet  # Claude 3.5 Sonnet"#;

const REASON_EXAMPLES: &str = r#"EXAMPLES:
  claudrock reason "Why is the sky blue?" --type scientific
  claudrock reason "Prove there are infinitely many primes" --type mathematical -m opus4.1"#;

const WRITE_EXAMPLES: &str = r#"EXAMPLES:
  claudrock write "A lighthouse keeper's last night" --style narrative --length long
  claudrock write "Autumn" --style poetry --length short"#;

const COMPARE_EXAMPLES: &str = r#"EXAMPLES:
  claudrock compare "Explain recursion"                    # haiku, sonnet3.5, sonnet4, opus4
  claudrock compare "Explain recursion" -m haiku,sonnet4   # Chosen models"#;

const RECOMMEND_EXAMPLES: &str = r#"EXAMPLES:
  claudrock recommend coding   # Best model for code generation
  claudrock recommend          # Every recommendation"#;

const MODELS_EXAMPLES: &str = r#"EXAMPLES:
  claudrock models list                  # Models of the active family
  claudrock -f claude3 models list       # Models of the smaller client
  claudrock models default opus4         # Set the default chat model"#;

const INFO_EXAMPLES: &str = r#"EXAMPLES:
  claudrock info                         # Show config path, region, endpoint and credentials"#;

const COMPLETIONS_EXAMPLES: &str = r#"EXAMPLES:
  claudrock completions bash > ~/.bashrc       # Add bash completions
  claudrock completions zsh > ~/.zshrc         # Add zsh completions
  claudrock completions fish > ~/.config/fish/completions/claudrock.fish"#;

const SMOKE_TEST_EXAMPLES: &str = r#"EXAMPLES:
  claudrock smoke-test                  # Exercise the active family end to end
  claudrock -f claude3 smoke-test       # Haiku, Sonnet and code generation"#;

#[derive(Subcommand)]
pub enum Commands {
    /// Single-turn chat
    #[command(after_long_help = CHAT_EXAMPLES)]
    Chat(ChatArgs),
    /// Analyze a local image file
    #[command(after_long_help = IMAGE_EXAMPLES)]
    Image(ImageArgs),
    /// Generate code from a description
    #[command(after_long_help = CODE_EXAMPLES)]
    Code(CodeArgs),
    /// Continue a multi-turn conversation stored as JSON (Claude 3 client)
    #[command(after_long_help = CONVERSE_EXAMPLES)]
    Converse(ConverseArgs),
    /// Structured reasoning over a problem (Claude 4 client)
    #[command(after_long_help = REASON_EXAMPLES)]
    Reason(ReasonArgs),
    /// Creative writing in a given style (Claude 4 client)
    #[command(after_long_help = WRITE_EXAMPLES)]
    Write(WriteArgs),
    /// Send one prompt to several models (Claude 4 client)
    #[command(after_long_help = COMPARE_EXAMPLES)]
    Compare(CompareArgs),
    /// Recommend a model for a kind of task
    #[command(after_long_help = RECOMMEND_EXAMPLES)]
    Recommend(RecommendArgs),
    /// List models or set the default one
    #[command(after_long_help = MODELS_EXAMPLES)]
    Models(ModelsArgs),
    /// Show configuration and environment
    #[command(after_long_help = INFO_EXAMPLES)]
    Info(InfoArgs),
    /// Generate shell completions
    #[command(after_long_help = COMPLETIONS_EXAMPLES)]
    Completions(CompletionsArgs),
    /// Check region and credentials with a few live calls
    #[command(after_long_help = SMOKE_TEST_EXAMPLES)]
    SmokeTest(SmokeTestArgs),
}

/// What the CLI needs from a successful result to print it
pub trait Reply: Serialize {
    fn text(&self) -> &str;
    fn model_used(&self) -> &str;
    fn generation(&self) -> Option<&str>;
    fn usage(&self) -> &Usage;
}

impl Reply for ChatReply {
    fn text(&self) -> &str {
        &self.response
    }

    fn model_used(&self) -> &str {
        &self.model_used
    }

    fn generation(&self) -> Option<&str> {
        self.model_generation.as_deref()
    }

    fn usage(&self) -> &Usage {
        &self.usage
    }
}

impl Reply for ImageAnalysis {
    fn text(&self) -> &str {
        &self.analysis
    }

    fn model_used(&self) -> &str {
        &self.model_used
    }

    fn generation(&self) -> Option<&str> {
        self.model_generation.as_deref()
    }

    fn usage(&self) -> &Usage {
        &self.usage
    }
}

/// Print a result and turn its failure arm into an error.
///
/// With `json` the whole result goes to stdout, failure included.
pub fn report<T: Reply>(outcome: &Outcome<T>, json: bool, output_level: OutputLevel) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    }

    match outcome {
        Outcome::Success(reply) => {
            if !json {
                println!("{}", reply.text());
            }
            let generation = reply
                .generation()
                .map(|g| format!(" ({g})"))
                .unwrap_or_default();
            output::detail(
                &format!("model: {}{generation}", output::format_model(reply.model_used())),
                output_level,
            );
            if !reply.usage().is_empty() {
                output::detail(
                    &format!("usage: {}", usage_summary(reply.usage())),
                    output_level,
                );
            }
            Ok(())
        }
        Outcome::Failure(failure) => Err(anyhow!("{}: {}", failure.model_used, failure.error)),
    }
}

/// `input_tokens=12 output_tokens=40` style rendering of provider usage
pub fn usage_summary(usage: &Usage) -> String {
    usage
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the environment carries a non-empty value for `var_name`
fn env_var_status(var_name: &str) -> &'static str {
    match std::env::var(var_name) {
        Ok(value) if !value.trim().is_empty() => "Present",
        _ => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claudrock_core::{Failure, LlmError};

    fn reply(text: &str) -> Outcome<ChatReply> {
        let mut usage = Usage::new();
        usage.insert("input_tokens".to_string(), 3.into());
        usage.insert("output_tokens".to_string(), 5.into());
        Outcome::Success(ChatReply {
            response: text.to_string(),
            model_used: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            model_generation: None,
            usage,
            conversation_length: None,
            timestamp: chrono::Local::now(),
        })
    }

    #[test]
    fn test_report_success() {
        assert!(report(&reply("pong"), false, OutputLevel::Quiet).is_ok());
        assert!(report(&reply("pong"), true, OutputLevel::Quiet).is_ok());
    }

    #[test]
    fn test_report_failure_is_error() {
        let failure = Failure::new(
            &LlmError::authentication("bad token"),
            "anthropic.claude-opus-4-20250514-v1:0",
        );
        let outcome: Outcome<ChatReply> = Outcome::Failure(failure);

        let err = report(&outcome, false, OutputLevel::Quiet).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("anthropic.claude-opus-4-20250514-v1:0: "));
        assert!(message.contains("bad token"));
    }

    #[test]
    fn test_usage_summary() {
        let Outcome::Success(chat) = reply("x") else {
            panic!("expected success");
        };
        assert_eq!(usage_summary(&chat.usage), "input_tokens=3 output_tokens=5");
        assert_eq!(usage_summary(&Usage::new()), "");
    }
}
