//! API Routes
//!
//! Configures the Axum router with all auction service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_auction_handler, get_auction_handler, health_handler, list_auctions_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /auctions` - Create an auction
/// - `GET /auctions` - List auctions, optionally `?status=active|completed`
/// - `GET /auctions/:id` - Fetch one auction
/// - `GET /stats` - Expiration sweep statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/auctions",
            post(create_auction_handler).get(list_auctions_handler),
        )
        .route("/auctions/:id", get(get_auction_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
