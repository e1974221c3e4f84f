use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use componentary_assistant::{
    config::{
        AssistantConfig, Config, LogsConfig, ModelConfig, ModelProvider, ServerConfig,
    },
    llm::{ModelHandle, TextGenerator},
    server::{create_router, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        model: ModelConfig {
            provider: ModelProvider::Disabled,
            base_url: "http://localhost:8080/generate".to_string(),
            api_key: None,
            model: "HuggingFaceTB/SmolLM2-135M".to_string(),
            timeout_secs: 5,
        },
        assistant: AssistantConfig::default(),
    }
}

/// App with no model loaded: every reply comes from the fallback responder.
pub fn create_fallback_app() -> Router {
    create_router(AppState::new(&create_test_config(), ModelHandle::new()))
}

/// App whose model handle was initialized with `generator`.
pub async fn create_app_with(generator: Arc<dyn TextGenerator>) -> (Router, ModelHandle) {
    let handle = ModelHandle::new();
    handle.initialize(generator).await;
    let app = create_router(AppState::new(&create_test_config(), handle.clone()));
    (app, handle)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9100
  logs:
    level: "debug"

model:
  provider: "huggingface"
  base_url: "http://smollm-ai:8080/generate"
  api_key: "hf_test"
  model: "HuggingFaceTB/SmolLM2-360M"
  timeout_secs: 30

assistant:
  store_name: "Componentary"
  chat:
    confidence: 0.95
    generation:
      max_new_tokens: 64
      temperature: 0.2
      top_p: 0.8
      repetition_penalty: 1.2
      no_repeat_ngram_size: 3
"#;

/// Sample configuration for an OpenAI-compatible completions server
pub const SAMPLE_CONFIG_OPENAI: &str = r#"
model:
  provider: "openai"
  base_url: "http://localhost:8001/v1"
  model: "smollm2-135m"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
model:
  provider: "unknown"
"#;
