use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints served directly by axum rather than through the page dispatcher.
/// None of them carry guards.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Used for monitoring and load balancer checks.
        .route("/health", get(handlers::health))
        // GET /api/routes
        // Named-route manifest so the front end can build links from route names.
        .route("/api/routes", get(handlers::route_manifest))
}
