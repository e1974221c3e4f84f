use super::{
    cleaner::{ResponseCleaner, extract_continuation},
    context::{PageContext, ProductInfo},
    fallback::{helper_fallback, seller_fallback},
    prompts::{Prompt, build_helper_prompt, build_seller_prompt},
    validator::ResponseValidator,
};
use crate::{
    config::{AssistantConfig, VariantConfig},
    llm::{GenerationParams, ModelHandle},
};
use tracing::{debug, error, info};

/// Result of asking the model for a continuation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Completed(String),
    /// No model is loaded.
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub response: String,
    pub confidence: f32,
    pub source: ReplySource,
}

/// Prompt → generate → clean → validate, with the rule-based responder
/// standing in whenever any step yields nothing usable.
#[derive(Debug, Clone)]
pub struct ReplyPipeline {
    model: ModelHandle,
    store_name: String,
    chat: VariantConfig,
    website_helper: VariantConfig,
    seller_cleaner: ResponseCleaner,
    helper_cleaner: ResponseCleaner,
    seller_validator: ResponseValidator,
    helper_validator: ResponseValidator,
}

impl ReplyPipeline {
    pub fn new(model: ModelHandle, config: &AssistantConfig) -> Self {
        Self {
            model,
            store_name: config.store_name.clone(),
            chat: config.chat.clone(),
            website_helper: config.website_helper.clone(),
            seller_cleaner: ResponseCleaner::seller_chat(),
            helper_cleaner: ResponseCleaner::website_helper(),
            seller_validator: ResponseValidator::seller_chat(),
            helper_validator: ResponseValidator::website_helper(),
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub async fn seller_reply(
        &self,
        message: &str,
        product_info: &ProductInfo,
        seller_name: &str,
    ) -> Reply {
        let prompt = build_seller_prompt(message, product_info, seller_name, &self.store_name);
        let outcome = self.invoke(&prompt, &self.chat.generation).await;

        let generated = self.accept(
            outcome,
            &prompt,
            &self.seller_cleaner,
            &self.seller_validator,
        );
        self.reply(generated, self.chat.confidence, || {
            seller_fallback(message, product_info, &self.store_name)
        })
    }

    pub async fn helper_reply(&self, message: &str, page_context: &PageContext) -> Reply {
        let prompt = build_helper_prompt(message, page_context, &self.store_name);
        let outcome = self.invoke(&prompt, &self.website_helper.generation).await;

        let generated = self.accept(
            outcome,
            &prompt,
            &self.helper_cleaner,
            &self.helper_validator,
        );
        self.reply(generated, self.website_helper.confidence, || {
            helper_fallback(message, page_context, &self.store_name)
        })
    }

    async fn invoke(&self, prompt: &Prompt, params: &GenerationParams) -> GenerationOutcome {
        let Some(generator) = self.model.get() else {
            return GenerationOutcome::Unavailable;
        };

        match generator.generate(&prompt.text, params).await {
            Ok(text) => GenerationOutcome::Completed(text),
            Err(e) => {
                error!("Error generating response: {}", e);
                GenerationOutcome::Failed(e.to_string())
            }
        }
    }

    /// The cleaned continuation when the model produced an acceptable reply.
    fn accept(
        &self,
        outcome: GenerationOutcome,
        prompt: &Prompt,
        cleaner: &ResponseCleaner,
        validator: &ResponseValidator,
    ) -> Option<String> {
        let raw = match outcome {
            GenerationOutcome::Completed(raw) => raw,
            GenerationOutcome::Unavailable => {
                debug!("Model not loaded, using fallback");
                return None;
            }
            GenerationOutcome::Failed(_) => return None,
        };

        debug!("Full model response: {}", raw);
        let continuation = extract_continuation(&raw, &prompt.cue, &prompt.text);
        debug!("Extracted response: {}", continuation);
        let cleaned = cleaner.clean(continuation);
        debug!("Cleaned response: {}", cleaned);

        match validator.check(&cleaned) {
            Ok(()) => Some(cleaned),
            Err(rejection) => {
                info!("Generated response failed validation ({:?}), using fallback", rejection);
                None
            }
        }
    }

    fn reply(
        &self,
        generated: Option<String>,
        confidence: f32,
        fallback: impl FnOnce() -> String,
    ) -> Reply {
        let (response, source) = match generated {
            Some(response) => (response, ReplySource::Model),
            None => (fallback(), ReplySource::Fallback),
        };
        Reply {
            response,
            confidence,
            source,
        }
    }
}
