//! # claudrock-core - Claude on Amazon Bedrock
//!
//! Convenience clients for Anthropic Claude models served through the
//! Bedrock Runtime `InvokeModel` endpoint.
//!
//! ## Features
//!
//! - **Short model names** - `"haiku"`, `"sonnet4"`, `"opus4.1"` instead of versioned Bedrock ids
//! - **Two clients** - [`ClaudeClient`] for Claude 3/3.5, [`Claude4Client`] for the full catalog
//! - **Prompt templates** - code generation, reasoning, creative writing, image analysis
//! - **No surprises** - operations never return `Err`; failures come back as a result variant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use claudrock_core::ClaudeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClaudeClient::from_env()?;
//!     let result = client.chat("What is the capital of France?", "haiku", 4000, 0.7).await;
//!
//!     match result.response() {
//!         Some(text) => println!("Response: {text}"),
//!         None => eprintln!("Error: {}", result.error().unwrap_or("unknown")),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Templates
//!
//! ```rust,no_run
//! use claudrock_core::{Claude4Client, WritingLength, WritingStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Claude4Client::from_env()?;
//!     let poem = client
//!         .creative_writing("the sea at night", WritingStyle::Poetry, WritingLength::Short, "opus4.1")
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&poem)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns an [`Outcome`]. Check it before using the reply:
//!
//! ```rust,no_run
//! # use claudrock_core::{ClaudeClient, Outcome};
//! # async fn run(client: ClaudeClient) {
//! match client.chat("ping", "haiku", 100, 0.0).await {
//!     Outcome::Success(reply) => println!("{} ({})", reply.response, reply.model_used),
//!     Outcome::Failure(failure) => eprintln!("{} failed: {}", failure.model_used, failure.error),
//! }
//! # }
//! ```
//!
//! Lower-level pieces ([`ModelInvoker`], [`BedrockRuntime`]) return
//! [`Result<T, LlmError>`](LlmError).

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod result;
pub mod types;
pub mod utils;


pub use catalog::{CatalogEntry, ModelCatalog, ModelMetadata};
pub use client::{Claude4Client, ClaudeClient, DEFAULT_COMPARISON_MODELS};
pub use config::{AwsKeys, BedrockConfig, ConfigBuilder, DEFAULT_REGION, ProviderConfig};
pub use error::LlmError;
pub use prompts::{AnalysisDepth, CodeComplexity, ReasoningType, WritingLength, WritingStyle};
pub use providers::BedrockRuntime;
pub use result::{
    ChatReply, ChatResult, ComparisonEntry, Failure, ImageAnalysis, ImageResult, ModelComparison,
    ModelRecommendation, Outcome,
};
pub use types::{
    ANTHROPIC_VERSION, ChatRequest, Completion, ContentBlock, ImageSource, Message,
    MessageContent, ModelInvoker, Role, Usage,
};
pub use utils::media::media_type_for_path;

// Re-export test utilities for unit tests
#[cfg(test)]
pub use utils::test_helpers;
