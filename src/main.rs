// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::card_service::CardService;
use crate::application::feed_service::FeedService;
use crate::infrastructure::config::{load_cards_config, load_service_config};
use crate::infrastructure::feed_store_from_settings;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{feed_status, get_card, health_check, list_cards};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let service_config = load_service_config()?;
    let cards_config = load_cards_config()?;

    // Create feed store (infrastructure layer)
    let store = feed_store_from_settings(&service_config.storage);

    // Create services (application layer)
    let feed_service = FeedService::new(store, service_config.freshness.clone());
    let card_service = CardService::new(feed_service.clone(), cards_config);

    // Create application state
    let state = Arc::new(AppState {
        card_service,
        feed_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/cards", get(list_cards))
        .route("/cards/:id", get(get_card))
        .route("/feed/status", get(feed_status))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state);

    // Start server
    let addr: SocketAddr = service_config.server.bind.parse()?;
    tracing::info!("Starting coviz-stats service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
