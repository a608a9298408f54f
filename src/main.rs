//! Hookline server binary.
//!
//! Loads configuration, wires the in-memory repository and the content
//! collaborator into the HTTP router, and serves until interrupted.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hookline::adapters::ai::{GeminiCollaborator, GeminiConfig, MockCollaborator};
use hookline::adapters::http::{project_router, ProjectAppState};
use hookline::adapters::storage::InMemoryProjectRepository;
use hookline::config::{AppConfig, ServerConfig};
use hookline::ports::ContentCollaborator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let collaborator = build_collaborator(&config)?;
    let provider = collaborator.provider_info();
    info!(provider = %provider.name, model = %provider.model, "Content collaborator ready");

    let state = ProjectAppState::new(Arc::new(InMemoryProjectRepository::new()), collaborator);
    let app = project_router()
        .with_state(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Hookline listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_collaborator(
    config: &AppConfig,
) -> Result<Arc<dyn ContentCollaborator>, Box<dyn std::error::Error>> {
    match &config.ai.gemini_api_key {
        Some(key) if config.ai.has_gemini() => {
            let gemini = GeminiConfig::new(key.expose_secret().clone())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            Ok(Arc::new(GeminiCollaborator::new(gemini)?))
        }
        _ => {
            warn!("No Gemini API key configured, using the mock collaborator");
            Ok(Arc::new(MockCollaborator::new()))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
