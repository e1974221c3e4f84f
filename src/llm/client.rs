use super::types::*;
use crate::{
    Error, Result,
    config::{ModelConfig, ModelProvider},
};
use async_openai::{Client, config::OpenAIConfig, types::CreateCompletionRequestArgs};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

/// A text-generation backend. `generate` returns the decoded continuation,
/// which may still contain the echoed prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Called once at startup. An error leaves the service in fallback-only mode.
    async fn load(&self) -> Result<()>;

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    fn model_id(&self) -> String;
}

/// Builds the generator selected by the config, or `None` when the model is
/// disabled.
pub fn create_generator(config: &ModelConfig) -> Result<Option<Arc<dyn TextGenerator>>> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        ModelProvider::Huggingface => Arc::new(HfInferenceClient::new(config)?),
        ModelProvider::Openai => Arc::new(OpenAiCompletionClient::new(config)?),
        ModelProvider::Disabled => {
            info!("Model provider disabled, serving fallback responses only");
            return Ok(None);
        }
    };
    Ok(Some(generator))
}

fn build_http_client(config: &ModelConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

pub struct HfInferenceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HfInferenceClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::config("model.base_url is required for the huggingface provider"));
        }

        Ok(Self {
            http: build_http_client(config)?,
            endpoint: config.base_url.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            model: config.model.clone(),
        })
    }

    async fn request(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = HfGenerateRequest {
            inputs: prompt,
            parameters: HfParameters::from(params),
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: HfGenerateResponse = response.json().await?;
        parsed
            .into_text()
            .ok_or_else(|| Error::llm("Provider returned no generated text"))
    }
}

#[async_trait]
impl TextGenerator for HfInferenceClient {
    async fn load(&self) -> Result<()> {
        info!("Probing text-generation endpoint {} for {}", self.endpoint, self.model);
        let probe = GenerationParams {
            max_new_tokens: 1,
            ..GenerationParams::default()
        };
        self.request("Hello", &probe).await?;
        Ok(())
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(
            "Requesting up to {} new tokens for a {}-char prompt",
            params.max_new_tokens,
            prompt.len()
        );
        self.request(prompt, params).await
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new();

        if let Some(ref key) = config.api_key {
            openai_config = openai_config.with_api_key(key);
        }

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(&config.base_url);
        }

        let client = Client::with_config(openai_config).with_http_client(build_http_client(config)?);

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompletionClient {
    async fn load(&self) -> Result<()> {
        info!("Checking model {} on completions endpoint", self.model);
        self.client.models().retrieve(&self.model).await?;
        Ok(())
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        // Completions APIs expose an additive frequency penalty rather than a
        // multiplicative repetition penalty; 1.0 means "no penalty" in both.
        let request = CreateCompletionRequestArgs::default()
            .model(&self.model)
            .prompt(prompt)
            .max_tokens(params.max_new_tokens)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .frequency_penalty((params.repetition_penalty - 1.0).clamp(0.0, 2.0))
            .echo(true)
            .build()?;

        let response = self.client.completions().create(request).await?;

        debug!(
            "Received completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| Error::llm("Completion response had no choices"))
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config(provider: ModelProvider) -> ModelConfig {
        ModelConfig {
            provider,
            base_url: "http://localhost:9999/generate".to_string(),
            api_key: Some("test-api-key".to_string()),
            model: "HuggingFaceTB/SmolLM2-135M".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_disabled_provider_builds_nothing() {
        let generator = create_generator(&create_test_config(ModelProvider::Disabled)).unwrap();
        assert!(generator.is_none());
    }

    #[test]
    fn test_huggingface_provider_keeps_model_id() {
        let generator = create_generator(&create_test_config(ModelProvider::Huggingface))
            .unwrap()
            .unwrap();
        assert_eq!(generator.model_id(), "HuggingFaceTB/SmolLM2-135M");
    }

    #[test]
    fn test_huggingface_requires_endpoint() {
        let mut config = create_test_config(ModelProvider::Huggingface);
        config.base_url = String::new();
        assert!(HfInferenceClient::new(&config).is_err());
    }

    #[test]
    fn test_empty_api_key_is_not_sent() {
        let mut config = create_test_config(ModelProvider::Huggingface);
        config.api_key = Some(String::new());
        let client = HfInferenceClient::new(&config).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_hf_parameters_request_full_text() {
        let params = HfParameters::from(&GenerationParams::website_helper());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["max_new_tokens"], 40);
        assert_eq!(json["return_full_text"], true);
        assert_eq!(json["no_repeat_ngram_size"], 2);
    }

    #[test]
    fn test_hf_response_shapes() {
        let batch: HfGenerateResponse =
            serde_json::from_str(r#"[{"generated_text": "a"}, {"generated_text": "b"}]"#).unwrap();
        assert_eq!(batch.into_text(), Some("a".to_string()));

        let single: HfGenerateResponse =
            serde_json::from_str(r#"{"generated_text": "only"}"#).unwrap();
        assert_eq!(single.into_text(), Some("only".to_string()));

        let empty: HfGenerateResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_text(), None);
    }
}
