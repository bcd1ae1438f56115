use std::sync::Arc;

use axum::{
    Json,
    http::{HeaderMap, Method},
    response::{Html, IntoResponse, Response},
};

use crate::{
    auth::AuthUser,
    config::AppConfig,
    error::AppError,
    models::{AuthProps, PageObject, PageProps, UserProfile},
};

/// Request header marking an Inertia (XHR) visit.
pub const INERTIA_HEADER: &str = "x-inertia";
/// Request header carrying the client's asset version.
pub const INERTIA_VERSION_HEADER: &str = "x-inertia-version";

/// RenderRequest
///
/// Everything the renderer needs to know about the visit: which page, for which
/// URL and user, and how the client wants it delivered.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub page: &'a str,
    pub url: &'a str,
    pub method: &'a Method,
    pub user: Option<&'a AuthUser>,
    pub inertia: bool,
}

/// PageRenderer
///
/// Turns a page name into an HTTP response. The dispatcher only ever calls this
/// after every guard on the route has passed.
pub trait PageRenderer: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Response, AppError>;

    /// The asset version clients must be running.
    fn version(&self) -> &str;
}

/// RendererState
///
/// The renderer as shared through the application state.
pub type RendererState = Arc<dyn PageRenderer>;

/// InertiaRenderer
///
/// Serves JSON page objects to Inertia visits and a bootstrapping HTML document
/// to everything else.
#[derive(Debug, Clone)]
pub struct InertiaRenderer {
    app_name: String,
    version: String,
}

impl InertiaRenderer {
    pub fn new(app_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.app_name.clone(), config.asset_version.clone())
    }

    /// Builds the page object. Only shared props are included.
    pub fn page_object(&self, request: &RenderRequest<'_>) -> PageObject {
        PageObject {
            component: request.page.to_string(),
            props: PageProps {
                name: self.app_name.clone(),
                auth: AuthProps {
                    user: request.user.map(UserProfile::from),
                },
            },
            url: request.url.to_string(),
            version: self.version.clone(),
        }
    }

    fn html_document(&self, page: &PageObject) -> Result<String, AppError> {
        let data = serde_json::to_string(page).map_err(|e| AppError::Render(e.to_string()))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script type="module" src="/build/app.js?v={version}"></script>
</head>
<body>
<div id="app" data-page="{data}"></div>
</body>
</html>
"#,
            title = escape_html(&self.app_name),
            version = escape_html(&self.version),
            data = escape_html(&data),
        ))
    }
}

impl PageRenderer for InertiaRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Response, AppError> {
        let page = self.page_object(request);

        if request.inertia {
            return Ok(([(INERTIA_HEADER, "true")], Json(page)).into_response());
        }

        let document = self.html_document(&page)?;
        Ok(Html(document).into_response())
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// check_asset_version
///
/// A stale Inertia client must reload the whole document to pick up new assets.
/// Applies to every Inertia `GET`, whatever the route would have answered. A
/// missing version header counts as an empty version.
pub fn check_asset_version(
    headers: &HeaderMap,
    method: &Method,
    url: &str,
    current: &str,
) -> Result<(), AppError> {
    if !is_inertia(headers) || *method != Method::GET {
        return Ok(());
    }

    let client_version = headers
        .get(INERTIA_VERSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if client_version == current {
        return Ok(());
    }
    Err(AppError::VersionConflict {
        location: url.to_string(),
    })
}

/// Whether the request is an Inertia visit.
pub fn is_inertia(headers: &HeaderMap) -> bool {
    headers
        .get(INERTIA_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
