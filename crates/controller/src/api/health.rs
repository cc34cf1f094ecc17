//! Health check endpoints.

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;
use serde_json::json;

use super::{respond, ApiError};
use crate::db::DatabaseHandle;
use crate::result_ext::ResultExt;
use crate::state::AppState;

/// Detailed status reported under the API path.
#[derive(Debug, Serialize)]
pub struct StatusData {
    /// Database connectivity status
    pub database: &'static str,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Server version
    pub version: &'static str,
}

/// `GET /health`
///
/// Liveness probe; answers without touching the database.
pub async fn health_check() -> Response {
    respond(StatusCode::OK, json!({"status": "ok"}), "ok", None)
}

/// `GET <api_path>/status`
///
/// Pings the database. A failed ping is reported as a 500 envelope with
/// the database message.
pub async fn api_status<D>(State(state): State<AppState<D>>) -> Result<Response, ApiError>
where
    D: DatabaseHandle + Clone + 'static,
{
    state.db.ping().await.log("Database health check")?;

    let data = StatusData {
        database: "connected",
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION"),
    };
    Ok(respond(StatusCode::OK, data, "ok", None))
}
