//! `/categories` handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use bistro_core::input::{CreateCategoryInput, UpdateCategoryInput};
use bistro_core::Category;
use bistro_db::generate_id;
use chrono::Utc;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(ApiResponse::ok(categories, "Categories fetched successfully"))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Category>> {
    let category = find(&state, &id).await?;
    Ok(ApiResponse::ok(category, "Category fetched successfully"))
}

async fn create_category(
    State(state): State<AppState>,
    _actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateCategoryInput>,
) -> ApiResult<ApiResponse<Category>> {
    let now = Utc::now();
    let category = Category {
        id: generate_id(),
        name: input.name.trim().to_string(),
        description: input.description,
        sort_order: input.sort_order.unwrap_or(0),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.db.categories().insert(&category).await?;
    Ok(ApiResponse::created(category, "Category created successfully"))
}

async fn update_category(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCategoryInput>,
) -> ApiResult<ApiResponse<Category>> {
    let mut category = find(&state, &id).await?;
    if let Some(name) = input.name {
        category.name = name.trim().to_string();
    }
    if let Some(description) = input.description {
        category.description = Some(description);
    }
    if let Some(sort_order) = input.sort_order {
        category.sort_order = sort_order;
    }
    if let Some(is_active) = input.is_active {
        category.is_active = is_active;
    }
    category.updated_at = Utc::now();

    state.db.categories().update(&category).await?;
    Ok(ApiResponse::ok(category, "Category updated successfully"))
}

async fn delete_category(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.categories().delete(&id).await?;
    Ok(ApiResponse::ok((), "Category deleted successfully"))
}

async fn find(state: &AppState, id: &str) -> ApiResult<Category> {
    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))
}
