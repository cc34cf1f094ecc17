//! Router assembly.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::health;
use crate::config::BackendConfig;
use crate::db::DatabaseHandle;
use crate::result_ext::OptionResultExt;
use crate::state::AppState;

/// Build the application router.
///
/// `/health` is served at the root; API routes are nested under the
/// configured API path.
pub fn build_router<D>(state: AppState<D>) -> Router
where
    D: DatabaseHandle + Clone + 'static,
{
    let cors = cors_layer(&state.config.backend);

    let api_routes = Router::new().route("/status", get(health::api_status::<D>));

    let router = Router::new().route("/health", get(health::health_check));
    let router = match api_mount_path(&state.config.backend.api_path) {
        Some(path) => router.nest(&path, api_routes),
        None => router.merge(api_routes),
    };

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Normalize the configured API path to `/segment[/segment...]`, or `None`
/// when it designates the root.
fn api_mount_path(api_path: &str) -> Option<String> {
    let trimmed = api_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

/// CORS: anything goes in development; otherwise only the frontend origin.
fn cors_layer(backend: &BackendConfig) -> CorsLayer {
    if backend.running_in_dev {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let restricted = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let Some(frontend_url) = backend
        .frontend_url
        .as_deref()
        .log_none("FRONTEND_URL not set, cross-origin requests are refused")
    else {
        return restricted;
    };

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => restricted.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url, "Invalid FRONTEND_URL, cross-origin requests are refused");
            restricted
        }
    }
}
