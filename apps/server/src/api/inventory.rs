//! `/inventory` handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use bistro_core::input::{CreateInventoryInput, UpdateInventoryInput};
use bistro_core::InventoryItem;
use bistro_db::generate_id;
use chrono::Utc;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        .route(
            "/{id}",
            get(get_inventory).put(update_inventory).delete(delete_inventory),
        )
}

async fn list_inventory(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<ApiResponse<Vec<InventoryItem>>> {
    let items = state.db.inventory().list().await?;
    Ok(ApiResponse::ok(items, "Inventory fetched successfully"))
}

async fn get_inventory(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<InventoryItem>> {
    let item = find(&state, &id).await?;
    Ok(ApiResponse::ok(item, "Inventory item fetched successfully"))
}

async fn create_inventory(
    State(state): State<AppState>,
    _actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateInventoryInput>,
) -> ApiResult<ApiResponse<InventoryItem>> {
    let now = Utc::now();
    let item = InventoryItem {
        id: generate_id(),
        menu_item_id: input.menu_item_id,
        current_stock: input.current_stock,
        min_stock: input.min_stock,
        max_stock: input.max_stock,
        unit: input.unit.trim().to_string(),
        is_active: input.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };
    state.db.inventory().insert(&item).await?;
    Ok(ApiResponse::created(item, "Inventory item created successfully"))
}

async fn update_inventory(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateInventoryInput>,
) -> ApiResult<ApiResponse<InventoryItem>> {
    let mut item = find(&state, &id).await?;
    if let Some(current_stock) = input.current_stock {
        item.current_stock = current_stock;
    }
    if let Some(min_stock) = input.min_stock {
        item.min_stock = min_stock;
    }
    if let Some(max_stock) = input.max_stock {
        item.max_stock = Some(max_stock);
    }
    if let Some(unit) = input.unit {
        item.unit = unit.trim().to_string();
    }
    if let Some(is_active) = input.is_active {
        item.is_active = is_active;
    }
    item.updated_at = Utc::now();

    state.db.inventory().update(&item).await?;
    Ok(ApiResponse::ok(item, "Inventory item updated successfully"))
}

async fn delete_inventory(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.inventory().delete(&id).await?;
    Ok(ApiResponse::ok((), "Inventory item deleted successfully"))
}

async fn find(state: &AppState, id: &str) -> ApiResult<InventoryItem> {
    state
        .db
        .inventory()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Inventory item", id))
}
