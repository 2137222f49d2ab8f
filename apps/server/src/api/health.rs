//! `/health` handler. Unauthenticated.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

/// 200 when the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let database = state.db.health_check().await;
    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = Health {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
    };
    (code, Json(body)).into_response()
}
