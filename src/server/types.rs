use crate::assistant::{PageContext, ProductInfo, Reply};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Accepted for compatibility with the storefront backend; not used.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    #[serde(default = "default_seller_name")]
    pub seller_name: String,
    #[serde(default)]
    pub product_info: ProductInfo,
}

#[derive(Debug, Deserialize)]
pub struct WebsiteHelperRequest {
    pub message: String,
    #[serde(default)]
    pub page_context: PageContext,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub response: String,
    pub confidence: f32,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            response: reply.response,
            confidence: reply.confidence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

fn default_seller_name() -> String {
    "Seller".to_string()
}
