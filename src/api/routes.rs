//! API Routes
//!
//! Configures the Axum router with all lookup server endpoints.

use std::time::Duration;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{health_handler, search_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/api/countries/search` - Look up a country (GET only, others get 400)
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Timeout: bounds every request to `request_timeout`
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/countries/search", any(search_handler))
        .route("/health", get(health_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
