use super::ChatCore;
use crate::catalog::ModelCatalog;
use crate::config::BedrockConfig;
use crate::error::LlmError;
use crate::prompts::expert_programmer_prompt;
use crate::providers::BedrockRuntime;
use crate::result::{ChatResult, ImageResult, Outcome};
use crate::types::{Message, ModelInvoker};
use std::path::Path;
use std::sync::Arc;

/// Client for Claude 3 Haiku and Claude 3.5 Sonnet
///
/// Short names: `haiku` (default), `sonnet`, `sonnet_v2`. Unknown names fall
/// back to each operation's default model.
#[derive(Clone)]
pub struct ClaudeClient {
    core: ChatCore,
}

impl ClaudeClient {
    pub const DEFAULT_CHAT_MODEL: &'static str = "haiku";
    pub const DEFAULT_MAX_TOKENS: u32 = 4000;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    pub const DEFAULT_IMAGE_MODEL: &'static str = "sonnet";
    pub const DEFAULT_IMAGE_PROMPT: &'static str = "Describe this image in detail.";

    pub const DEFAULT_CODE_MODEL: &'static str = "sonnet";
    pub const DEFAULT_LANGUAGE: &'static str = "python";
    pub const CODE_TEMPERATURE: f32 = 0.3;

    /// Create a client talking to Bedrock with the given configuration
    pub fn new(config: BedrockConfig) -> Result<Self, LlmError> {
        Ok(Self::with_invoker(Arc::new(BedrockRuntime::new(config)?)))
    }

    /// Create a client from `AWS_REGION` and friends
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::with_invoker(Arc::new(BedrockRuntime::from_env()?)))
    }

    /// Create a client over any invoker
    pub fn with_invoker(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            core: ChatCore::new(invoker, ModelCatalog::claude3()),
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        self.core.catalog()
    }

    /// Single-turn chat
    pub async fn chat(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> ChatResult {
        let entry = self.catalog().resolve(model);
        self.core
            .reply(entry, vec![Message::user(prompt)], max_tokens, temperature)
            .await
    }

    /// Describe a local image file.
    ///
    /// The prompt is sent as-is ahead of the image.
    pub async fn analyze_image(
        &self,
        image_path: impl AsRef<Path>,
        prompt: &str,
        model: &str,
    ) -> ImageResult {
        let entry = self.catalog().resolve_or(model, Self::DEFAULT_IMAGE_MODEL);
        self.core
            .analyze(
                entry,
                image_path.as_ref(),
                prompt.to_string(),
                Self::DEFAULT_MAX_TOKENS,
                Self::DEFAULT_TEMPERATURE,
                None,
            )
            .await
    }

    /// Generate code for `description` in `language`
    pub async fn generate_code(&self, description: &str, language: &str, model: &str) -> ChatResult {
        let prompt = expert_programmer_prompt(language, description);
        self.chat(&prompt, model, Self::DEFAULT_MAX_TOKENS, Self::CODE_TEMPERATURE)
            .await
    }

    /// Multi-turn conversation.
    ///
    /// `messages` is forwarded untouched: no trimming and no role checks.
    pub async fn conversation(&self, messages: Vec<Message>, model: &str) -> ChatResult {
        let entry = self.catalog().resolve(model);
        let turns = messages.len();

        let mut result = self
            .core
            .reply(
                entry,
                messages,
                Self::DEFAULT_MAX_TOKENS,
                Self::DEFAULT_TEMPERATURE,
            )
            .await;

        if let Outcome::Success(reply) = &mut result {
            reply.conversation_length = Some(turns);
        }
        result
    }
}
