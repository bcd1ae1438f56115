use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::guards::Guard;

/// AppError
///
/// Every way a page request can end without a rendered page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Route guard `{guard}` rejected the request")]
    GuardFailure {
        guard: Guard,
        /// Where the client should go instead. `None` when the target route is not registered.
        redirect: Option<String>,
        /// The caller asked for JSON, so answer with a status instead of a redirect.
        wants_json: bool,
    },

    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    #[error("Asset version changed")]
    VersionConflict { location: String },

    #[error("Failed to render page: {0}")]
    Render(String),
}

/// RouteTableError
///
/// Raised while building the route table at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route name `{0}` is registered more than once")]
    DuplicateName(String),

    #[error("route {method} {path} is registered more than once")]
    DuplicatePath { method: Method, path: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::GuardFailure {
                guard,
                redirect: Some(location),
                wants_json: false,
            } => {
                tracing::debug!(%guard, %location, "redirecting rejected request");
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            AppError::GuardFailure { guard, .. } => {
                let message = format!("Route guard `{guard}` rejected the request");
                (guard.failure_status(), Json(json!({ "message": message }))).into_response()
            }
            AppError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("No route matches {path}") })),
            )
                .into_response(),
            AppError::MethodNotAllowed { allowed } => {
                let allow = allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                response
            }
            AppError::VersionConflict { location } => {
                let mut response = StatusCode::CONFLICT.into_response();
                if let Ok(value) = HeaderValue::from_str(&location) {
                    response.headers_mut().insert("x-inertia-location", value);
                }
                response
            }
            AppError::Render(message) => {
                tracing::error!(%message, "page render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
