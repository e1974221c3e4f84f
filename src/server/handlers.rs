use super::types::{
    ChatRequest, ErrorResponse, HealthResponse, ReplyResponse, ServiceInfo, WebsiteHelperRequest,
};
use crate::{
    assistant::ReplyPipeline,
    config::Config,
    llm::ModelHandle,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReplyPipeline>,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(config: &Config, model: ModelHandle) -> Self {
        Self {
            pipeline: Arc::new(ReplyPipeline::new(model, &config.assistant)),
            info: Arc::new(ServiceInfo {
                name: config.assistant.service_name.clone(),
                version: config.assistant.version.clone(),
                model: config.model.model.clone(),
            }),
        }
    }
}

/// Faults inside a handler. The generation path never produces one; it
/// degrades to the fallback responder instead.
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        detail: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());
    info!(parent: &span, "Received chat request for seller {}", request.seller_name);

    let pipeline = state.pipeline.clone();
    let reply = tokio::spawn(
        async move {
            pipeline
                .seller_reply(&request.message, &request.product_info, &request.seller_name)
                .await
        }
        .instrument(span.clone()),
    )
    .await
    .map_err(|e| ApiError::Internal(format!("Chat endpoint error: {}", e)))?;

    info!(parent: &span, "Answered from {:?}", reply.source);
    Ok(Json(reply.into()))
}

pub async fn website_helper(
    State(state): State<AppState>,
    Json(request): Json<WebsiteHelperRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let span = info_span!("website_helper", request_id = %Uuid::new_v4());
    info!(
        parent: &span,
        "Received website helper request on page '{}'",
        request.page_context.current_page()
    );

    let pipeline = state.pipeline.clone();
    let reply = tokio::spawn(
        async move {
            pipeline
                .helper_reply(&request.message, &request.page_context)
                .await
        }
        .instrument(span.clone()),
    )
    .await
    .map_err(|e| ApiError::Internal(format!("Website helper endpoint error: {}", e)))?;

    info!(parent: &span, "Answered from {:?}", reply.source);
    Ok(Json(reply.into()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.pipeline.model().is_loaded(),
    })
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}
