//! Convenience clients
//!
//! [`ClaudeClient`] covers the Claude 3 / 3.5 models, [`Claude4Client`] the
//! full catalog with richer templates. Both funnel every operation through
//! the same primitive: build body, invoke, parse, wrap.

mod claude;
mod claude4;

pub use claude::ClaudeClient;
pub use claude4::{Claude4Client, DEFAULT_COMPARISON_MODELS};

use crate::catalog::{CatalogEntry, ModelCatalog};
use crate::error::LlmError;
use crate::prompts::AnalysisDepth;
use crate::result::{ChatReply, ChatResult, Failure, ImageAnalysis, ImageResult, Outcome};
use crate::types::{ChatRequest, Completion, ContentBlock, Message, ModelInvoker};
use crate::utils::media::load_image;
use chrono::Local;
use std::path::Path;
use std::sync::Arc;

/// Invoker plus catalog, shared by both clients
#[derive(Clone)]
pub(crate) struct ChatCore {
    invoker: Arc<dyn ModelInvoker>,
    catalog: ModelCatalog,
}

impl ChatCore {
    pub(crate) fn new(invoker: Arc<dyn ModelInvoker>, catalog: ModelCatalog) -> Self {
        Self { invoker, catalog }
    }

    pub(crate) fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    async fn complete(
        &self,
        model_id: &str,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion, LlmError> {
        let body = ChatRequest::new(messages, max_tokens, temperature).to_body()?;
        let response = self.invoker.invoke_model(model_id, body).await?;
        Completion::from_body(&response)
    }

    /// Send `messages` to `entry` and fold any error into the result
    pub(crate) async fn reply(
        &self,
        entry: &CatalogEntry,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: f32,
    ) -> ChatResult {
        match self
            .complete(entry.model_id, messages, max_tokens, temperature)
            .await
        {
            Ok(completion) => Outcome::Success(ChatReply {
                response: completion.text,
                model_used: entry.model_id.to_string(),
                model_generation: entry.metadata.map(|m| m.generation.to_string()),
                usage: completion.usage,
                conversation_length: None,
                timestamp: Local::now(),
            }),
            Err(e) => {
                log::warn!("{} via {} failed: {e}", entry.model_id, self.invoker.name());
                Outcome::Failure(Failure::new(&e, entry.model_id))
            }
        }
    }

    /// Read the image, send it after the text prompt, fold errors in
    pub(crate) async fn analyze(
        &self,
        entry: &CatalogEntry,
        image_path: &Path,
        prompt: String,
        max_tokens: u32,
        temperature: f32,
        depth: Option<AnalysisDepth>,
    ) -> ImageResult {
        let path_text = image_path.display().to_string();

        let result: Result<Completion, LlmError> = async {
            let image = load_image(image_path).await?;
            let message = Message::user_blocks(vec![
                ContentBlock::text(prompt),
                ContentBlock::base64_image(image.media_type, image.data),
            ]);
            self.complete(entry.model_id, vec![message], max_tokens, temperature)
                .await
        }
        .await;

        match result {
            Ok(completion) => Outcome::Success(ImageAnalysis {
                analysis: completion.text,
                analysis_depth: depth,
                model_used: entry.model_id.to_string(),
                model_generation: entry.metadata.map(|m| m.generation.to_string()),
                usage: completion.usage,
                image_path: path_text,
                timestamp: Local::now(),
            }),
            Err(e) => {
                log::warn!("image analysis of {path_text} with {} failed: {e}", entry.model_id);
                Outcome::Failure(Failure::new(&e, entry.model_id).with_image_path(path_text))
            }
        }
    }
}
