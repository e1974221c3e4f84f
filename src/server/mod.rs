pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    llm::{ModelHandle, create_generator},
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/website-helper", post(handlers::website_helper))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Loads the model once, then serves. The model handle is filled before the
/// listener is bound, so no request observes a half-initialized model.
pub async fn run(config: Config) -> Result<()> {
    let model = ModelHandle::new();
    if let Some(generator) = create_generator(&config.model)? {
        if !model.initialize(generator).await {
            warn!("Model failed to load, using fallback responses");
        }
    }

    let app = create_router(AppState::new(&config, model));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
