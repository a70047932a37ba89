//! gavel-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints and the
//! background lifecycle sweeper.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use gavel_gateway::api;
use gavel_gateway::app_state::AppState;
use gavel_gateway::config::GatewayConfig;
use gavel_gateway::domain::{AuctionRegistry, Clock, EventBus, SystemClock};
use gavel_gateway::service::{AuctionService, Sweeper};
use gavel_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting gavel-gateway");

    // Build domain layer
    let registry = Arc::new(AuctionRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    // Build service layer and open the first auction cycles
    let auction_service = Arc::new(AuctionService::new(
        registry,
        event_bus.clone(),
        clock,
        config.auction_min_duration(),
        config.auction_max_duration(),
    ));
    auction_service.seed().await;

    // Start the lifecycle sweeper
    let sweeper = Sweeper::new(Arc::clone(&auction_service), config.sweep_interval());
    let _sweeper_handle = sweeper.spawn();

    // Build application state
    let app_state = AppState {
        auction_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
