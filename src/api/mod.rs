//! HTTP API - routes, shared state and server startup
//!
//! Endpoints:
//! - GET  /health                      - Server status
//! - GET  /orders                      - All orders
//! - POST /orders                      - Create an order (201 + Location)
//! - GET  /orders/next                 - Oldest RECEIVED order
//! - PUT  /orders/next                 - Complete the current order, start the next one
//! - GET  /orders/{id}                 - One order
//! - GET  /orders/{id}/orderStatus     - Status of one order
//! - PUT  /orders/{id}/orderStatus     - Change the status of one order
//! - GET  /orderStatuses               - All statuses
//! - GET  /orderStatuses/{id}          - One status

/// Problem-body error responses
pub mod error;
/// Request extractors with problem-body rejections
pub mod extract;
/// Route handlers
pub mod handlers;
/// Hypermedia links
pub mod links;
/// JSON request and response bodies
pub mod resources;

use crate::{config::settings::ServerConfig, errors::Result};
use axum::{Router, routing::get};
use links::LinkBuilder;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared data available to all handlers.
pub struct ApiState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Builds the URLs placed in `_links` and `Location`
    pub links: LinkBuilder,
}

impl ApiState {
    /// Creates a new `ApiState` with the given database connection and link base URL.
    #[must_use]
    pub fn new(database: DatabaseConnection, base_url: &str) -> Self {
        Self {
            database,
            links: LinkBuilder::new(base_url),
        }
    }
}

/// Builds the application router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::general::health))
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/orders/next",
            get(handlers::orders::get_next_order).put(handlers::orders::advance_next_order),
        )
        .route("/orders/{id}", get(handlers::orders::get_order))
        .route(
            "/orders/{id}/orderStatus",
            get(handlers::orders::get_order_status_for_order)
                .put(handlers::orders::put_order_status_for_order),
        )
        .route(
            "/orderStatuses",
            get(handlers::order_statuses::list_order_statuses),
        )
        .route(
            "/orderStatuses/{id}",
            get(handlers::order_statuses::get_order_status),
        )
        .fallback(handlers::general::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Binds the configured address and serves the API until Ctrl-C.
pub async fn start_server(config: &ServerConfig, database: DatabaseConnection) -> Result<()> {
    let app = router(ApiState::new(database, &config.base_url));

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Pizzeria API listening on {bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pizzeria API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
