//! `/tables` handlers.

use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::Router;
use bistro_core::input::{CreateTableInput, UpdateTableStatusInput};
use bistro_core::{DiningTable, TableStatus};
use bistro_db::generate_id;
use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route("/{id}/status", put(update_table_status))
        .route("/{id}", delete(delete_table))
}

async fn list_tables(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<DiningTable>>> {
    let tables = state.db.tables().list().await?;
    Ok(ApiResponse::ok(tables, "Tables fetched successfully"))
}

async fn create_table(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateTableInput>,
) -> ApiResult<ApiResponse<DiningTable>> {
    let now = Utc::now();
    let table = DiningTable {
        id: generate_id(),
        table_number: input.table_number,
        capacity: input.capacity,
        location: input.location,
        status: TableStatus::Available,
        created_by: Some(actor.id),
        created_at: now,
        updated_at: now,
    };
    state.db.tables().insert(&table).await?;
    info!(table_id = %table.id, number = table.table_number, "Table created");
    Ok(ApiResponse::created(table, "Table created successfully"))
}

async fn update_table_status(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTableStatusInput>,
) -> ApiResult<ApiResponse<DiningTable>> {
    state.db.tables().update_status(&id, input.status).await?;
    let table = state
        .db
        .tables()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Table", &id))?;
    Ok(ApiResponse::ok(table, "Table status updated successfully"))
}

async fn delete_table(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.tables().delete(&id).await?;
    Ok(ApiResponse::ok((), "Table deleted successfully"))
}
