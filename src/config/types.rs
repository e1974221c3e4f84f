use crate::llm::GenerationParams;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Which text-generation backend serves the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelProvider {
    /// Hugging Face style `text-generation` endpoint.
    #[default]
    Huggingface,
    /// OpenAI-compatible completions endpoint.
    Openai,
    /// No model; every reply comes from the fallback responder.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(
        default = "VariantConfig::seller_chat",
        deserialize_with = "deserialize_seller_chat"
    )]
    pub chat: VariantConfig,
    #[serde(
        default = "VariantConfig::website_helper",
        deserialize_with = "deserialize_website_helper"
    )]
    pub website_helper: VariantConfig,
}

/// Per-endpoint knobs: the constant confidence reported to callers and the
/// sampling parameters handed to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub confidence: f32,
    pub generation: GenerationParams,
}

impl VariantConfig {
    pub fn seller_chat() -> Self {
        Self {
            confidence: 0.9,
            generation: GenerationParams::seller_chat(),
        }
    }

    pub fn website_helper() -> Self {
        Self {
            confidence: 0.8,
            generation: GenerationParams::website_helper(),
        }
    }
}

/// A variant block as written in YAML. Omitted keys keep the variant's own
/// defaults, which differ between chat and website helper.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VariantOverrides {
    confidence: Option<f32>,
    generation: GenerationOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerationOverrides {
    max_new_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    repetition_penalty: Option<f32>,
    no_repeat_ngram_size: Option<u32>,
}

impl VariantOverrides {
    fn apply(self, base: VariantConfig) -> VariantConfig {
        let generation = self.generation;
        VariantConfig {
            confidence: self.confidence.unwrap_or(base.confidence),
            generation: GenerationParams {
                max_new_tokens: generation
                    .max_new_tokens
                    .unwrap_or(base.generation.max_new_tokens),
                temperature: generation.temperature.unwrap_or(base.generation.temperature),
                top_p: generation.top_p.unwrap_or(base.generation.top_p),
                repetition_penalty: generation
                    .repetition_penalty
                    .unwrap_or(base.generation.repetition_penalty),
                no_repeat_ngram_size: generation
                    .no_repeat_ngram_size
                    .unwrap_or(base.generation.no_repeat_ngram_size),
            },
        }
    }
}

fn deserialize_seller_chat<'de, D>(deserializer: D) -> Result<VariantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(VariantOverrides::deserialize(deserializer)?.apply(VariantConfig::seller_chat()))
}

fn deserialize_website_helper<'de, D>(deserializer: D) -> Result<VariantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(VariantOverrides::deserialize(deserializer)?.apply(VariantConfig::website_helper()))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            service_name: default_service_name(),
            version: default_version(),
            chat: VariantConfig::seller_chat(),
            website_helper: VariantConfig::website_helper(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/generate".to_string()
}

fn default_model() -> String {
    "HuggingFaceTB/SmolLM2-135M".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_store_name() -> String {
    "Componentary".to_string()
}

fn default_service_name() -> String {
    "SmolLM2 AI Chat Service".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
