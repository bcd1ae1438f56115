use axum::{Router, extract::FromRef, http::HeaderName};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Session resolution and the guards evaluated against it.
pub mod auth;
pub mod guards;

// Request handling: dispatcher, renderer, error mapping.
pub mod error;
pub mod handlers;
pub mod render;

// Data and persistence.
pub mod models;
pub mod repository;

pub mod config;

// Page route table and the route groups it is built from.
pub mod routes;
use routes::{public, table::RouteTable};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, RouteTableError};
pub use render::{InertiaRenderer, RendererState};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for the service endpoints, served at `/api-docs/openapi.json`.
/// Page routes are not part of it; they are listed by `/api/routes`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::route_manifest),
    components(schemas(models::RouteManifest, models::RouteDescriptor, guards::Guard)),
    tags(
        (name = "cipher-portal", description = "Cipher Portal page server")
    )
)]
struct ApiDoc;

/// RouteTableState
///
/// The immutable route table as shared through the application state.
pub type RouteTableState = Arc<RouteTable>;

/// AppState
///
/// The single, immutable container shared by every request: the route table built
/// at startup, the renderer, the user repository and the configuration.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub routes: RouteTableState,
    pub renderer: RendererState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the service endpoints, mounts the page dispatcher as the fallback for
/// every other path, and applies the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Page routes: matched against the route table, guarded per entry.
        .fallback(handlers::dispatch_page)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` so every log line of a
/// request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
