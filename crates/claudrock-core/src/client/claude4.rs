use super::ChatCore;
use crate::catalog::ModelCatalog;
use crate::config::BedrockConfig;
use crate::error::LlmError;
use crate::prompts::{
    AnalysisDepth, CodeComplexity, RECOMMENDATIONS, ReasoningType, WritingLength, WritingStyle,
    recommendation_for,
};
use crate::providers::BedrockRuntime;
use crate::result::{
    ChatResult, ComparisonEntry, ImageResult, ModelComparison, ModelRecommendation,
};
use crate::types::{Message, ModelInvoker};
use chrono::Local;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Models compared when the caller does not name any
pub static DEFAULT_COMPARISON_MODELS: [&str; 4] = ["haiku", "sonnet3.5", "sonnet4", "opus4"];

/// Client for the Claude 4 family plus every Claude 3.x model
///
/// Replies carry the model generation from the catalog metadata.
#[derive(Clone)]
pub struct Claude4Client {
    core: ChatCore,
}

impl Claude4Client {
    pub const DEFAULT_CHAT_MODEL: &'static str = "sonnet4";
    pub const DEFAULT_MAX_TOKENS: u32 = 8000;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    pub const DEFAULT_REASONING_MODEL: &'static str = "opus4";
    pub const REASONING_TEMPERATURE: f32 = 0.3;

    pub const DEFAULT_IMAGE_MODEL: &'static str = "opus4";
    pub const DEFAULT_IMAGE_PROMPT: &'static str = "Provide a comprehensive analysis of this image.";

    pub const DEFAULT_CODE_MODEL: &'static str = "sonnet4";
    pub const DEFAULT_LANGUAGE: &'static str = "python";
    pub const CODE_TEMPERATURE: f32 = 0.2;

    pub const DEFAULT_WRITING_MODEL: &'static str = "opus4.1";
    pub const WRITING_TEMPERATURE: f32 = 0.8;

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
            core: ChatCore::new(invoker, ModelCatalog::claude4()),
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        self.core.catalog()
    }

    /// Single-turn chat with any catalog model
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

    /// Wrap `problem` in a reasoning template and ask at low temperature
    pub async fn advanced_reasoning(
        &self,
        problem: &str,
        reasoning_type: ReasoningType,
        model: &str,
    ) -> ChatResult {
        let prompt = reasoning_type.render(problem);
        self.chat(
            &prompt,
            model,
            Self::DEFAULT_MAX_TOKENS,
            Self::REASONING_TEMPERATURE,
        )
        .await
    }

    /// Analyze a local image, wrapping the prompt according to `depth`
    pub async fn analyze_image(
        &self,
        image_path: impl AsRef<Path>,
        prompt: &str,
        depth: AnalysisDepth,
        model: &str,
    ) -> ImageResult {
        let entry = self.catalog().resolve_or(model, Self::DEFAULT_IMAGE_MODEL);
        self.core
            .analyze(
                entry,
                image_path.as_ref(),
                depth.render(prompt),
                Self::DEFAULT_MAX_TOKENS,
                Self::DEFAULT_TEMPERATURE,
                Some(depth),
            )
            .await
    }

    pub async fn generate_code(
        &self,
        description: &str,
        language: &str,
        complexity: CodeComplexity,
        model: &str,
    ) -> ChatResult {
        let prompt = complexity.render(language, description);
        self.chat(
            &prompt,
            model,
            Self::DEFAULT_MAX_TOKENS,
            Self::CODE_TEMPERATURE,
        )
        .await
    }

    /// Styled writing; `length` picks the output-token budget
    pub async fn creative_writing(
        &self,
        prompt: &str,
        style: WritingStyle,
        length: WritingLength,
        model: &str,
    ) -> ChatResult {
        let prompt = style.render(prompt);
        self.chat(
            &prompt,
            model,
            length.max_tokens(),
            Self::WRITING_TEMPERATURE,
        )
        .await
    }

    /// Ask every model in `models` the same prompt, one after another.
    ///
    /// `None` compares [`DEFAULT_COMPARISON_MODELS`]. A failing model leaves
    /// an error row and does not stop the rest. Repeated names are asked once.
    pub async fn compare_models(&self, prompt: &str, models: Option<&[&str]>) -> ModelComparison {
        let models = models.unwrap_or(&DEFAULT_COMPARISON_MODELS[..]);
        let mut comparisons = BTreeMap::new();

        for &model in models {
            if comparisons.contains_key(model) {
                log::debug!("Skipping repeated model {model}");
                continue;
            }
            log::info!("Comparing model {model}");
            let result = self
                .chat(
                    prompt,
                    model,
                    Self::DEFAULT_MAX_TOKENS,
                    Self::DEFAULT_TEMPERATURE,
                )
                .await;
            let entry = ComparisonEntry::from_result(result, self.catalog().metadata(model));
            comparisons.insert(model.to_string(), entry);
        }

        ModelComparison {
            prompt: prompt.to_string(),
            comparisons,
            timestamp: Local::now(),
        }
    }

    /// Static advice, no remote call
    pub fn get_model_recommendations(&self, task_type: &str) -> ModelRecommendation {
        ModelRecommendation {
            task: task_type.to_string(),
            recommendation: recommendation_for(task_type),
            all_recommendations: RECOMMENDATIONS.iter().copied().collect(),
        }
    }
}
