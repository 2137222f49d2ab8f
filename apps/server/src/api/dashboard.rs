//! `/dashboard` handler.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use chrono::Utc;

use crate::auth::Actor;
use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::services::dashboard_service::Dashboard;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<ApiResponse<Dashboard>> {
    let dashboard = state.dashboard.snapshot(Utc::now()).await?;
    Ok(ApiResponse::ok(dashboard, "Dashboard data fetched successfully"))
}
