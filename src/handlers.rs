use crate::{
    AppState,
    auth::Session,
    error::AppError,
    guards::run_guards,
    models::{RouteDescriptor, RouteManifest},
    render::{RenderRequest, check_asset_version, is_inertia},
    routes::table::RouteMiss,
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, Uri, header},
    response::{IntoResponse, Response},
};

/// dispatch_page
///
/// The page dispatcher, mounted as the router fallback. For every request not claimed
/// by an explicit axum route it:
/// 1. rejects Inertia visits running a stale asset version,
/// 2. matches `(method, path)` against the route table,
/// 3. runs the entry's guards in order, stopping at the first denial,
/// 4. hands the page name to the renderer.
///
/// Every outcome varies on `X-Inertia`, so caches keep the HTML and JSON forms apart.
pub async fn dispatch_page(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut response = match resolve_page(&state, &session, &method, &uri, &headers) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static("X-Inertia"));
    response
}

fn resolve_page(
    state: &AppState,
    session: &Session,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let path = uri.path();
    let url = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path);

    if let Err(e) = check_asset_version(headers, method, url, state.renderer.version()) {
        tracing::info!(%url, "stale asset version, forcing reload");
        return Err(e);
    }

    let entry = state
        .routes
        .match_route(method, path)
        .map_err(|miss| match miss {
            RouteMiss::NotFound => {
                tracing::debug!(%path, "no page route");
                AppError::NotFound(path.to_string())
            }
            RouteMiss::MethodNotAllowed(allowed) => AppError::MethodNotAllowed { allowed },
        })?;

    if let Err(rejection) = run_guards(entry.guards(), session, &state.routes) {
        tracing::info!(
            route = entry.name(),
            guard = %rejection.guard,
            redirect = ?rejection.redirect,
            "guard rejected request"
        );
        return Err(AppError::GuardFailure {
            guard: rejection.guard,
            redirect: rejection.redirect,
            wants_json: wants_json(headers),
        });
    }

    let request = RenderRequest {
        page: entry.page(),
        url,
        method,
        user: session.user(),
        inertia: is_inertia(headers),
    };

    tracing::debug!(route = entry.name(), page = entry.page(), "rendering page");
    state.renderer.render(&request)
}

/// health
///
/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}

/// route_manifest
///
/// Lists every named page route so the front end can generate links by name
/// instead of hard-coding paths.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Named routes", body = RouteManifest))
)]
pub async fn route_manifest(State(state): State<AppState>) -> Json<RouteManifest> {
    let routes = state
        .routes
        .entries()
        .iter()
        .map(|entry| {
            let mut methods = vec![entry.method().to_string()];
            if *entry.method() == Method::GET {
                methods.push(Method::HEAD.to_string());
            }
            RouteDescriptor {
                name: entry.name().to_string(),
                uri: entry.path().to_string(),
                methods,
                guards: entry.guards().to_vec(),
            }
        })
        .collect();

    Json(RouteManifest { routes })
}

/// A JSON client (API call, not a page visit) gets a status code instead of a redirect.
fn wants_json(headers: &HeaderMap) -> bool {
    if is_inertia(headers) {
        return false;
    }
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}
