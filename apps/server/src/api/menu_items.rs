//! `/menu-items` handlers, including the nested variant routes.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::Router;
use bistro_core::input::{
    CreateMenuItemInput, CreateVariantInput, UpdateMenuItemInput, UpdateVariantInput,
};
use bistro_core::{MenuItem, MenuItemWithVariants, MenuVariant};
use bistro_db::generate_id;
use chrono::Utc;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu_items).post(create_menu_item))
        .route(
            "/{id}",
            get(get_menu_item).put(update_menu_item).delete(delete_menu_item),
        )
        .route("/{id}/variants", get(list_variants).post(create_variant))
        .route(
            "/{id}/variants/{variant_id}",
            put(update_variant).delete(delete_variant),
        )
}

// =============================================================================
// Menu items
// =============================================================================

async fn list_menu_items(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<MenuItemWithVariants>>> {
    let items = state.db.menu().list_with_variants().await?;
    Ok(ApiResponse::ok(items, "Menu items fetched successfully"))
}

async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<MenuItemWithVariants>> {
    let item = state
        .db
        .menu()
        .get_item_with_variants(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", &id))?;
    Ok(ApiResponse::ok(item, "Menu item fetched successfully"))
}

async fn create_menu_item(
    State(state): State<AppState>,
    _actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateMenuItemInput>,
) -> ApiResult<ApiResponse<MenuItem>> {
    let now = Utc::now();
    let item = MenuItem {
        id: generate_id(),
        name: input.name.trim().to_string(),
        description: input.description,
        base_price_cents: input.base_price_cents,
        category_id: input.category_id,
        image_url: input.image_url,
        is_available: input.is_available.unwrap_or(true),
        is_active: input.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };
    state.db.menu().insert_item(&item).await?;
    Ok(ApiResponse::created(item, "Menu item created successfully"))
}

async fn update_menu_item(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateMenuItemInput>,
) -> ApiResult<ApiResponse<MenuItem>> {
    let mut item = find_item(&state, &id).await?;
    if let Some(name) = input.name {
        item.name = name.trim().to_string();
    }
    if let Some(description) = input.description {
        item.description = Some(description);
    }
    if let Some(price) = input.base_price_cents {
        item.base_price_cents = price;
    }
    if let Some(category_id) = input.category_id {
        item.category_id = category_id;
    }
    if let Some(image_url) = input.image_url {
        item.image_url = Some(image_url);
    }
    if let Some(is_available) = input.is_available {
        item.is_available = is_available;
    }
    if let Some(is_active) = input.is_active {
        item.is_active = is_active;
    }
    item.updated_at = Utc::now();

    state.db.menu().update_item(&item).await?;
    Ok(ApiResponse::ok(item, "Menu item updated successfully"))
}

async fn delete_menu_item(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.menu().delete_item(&id).await?;
    Ok(ApiResponse::ok((), "Menu item deleted successfully"))
}

async fn find_item(state: &AppState, id: &str) -> ApiResult<MenuItem> {
    state
        .db
        .menu()
        .get_item(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", id))
}

// =============================================================================
// Variants
// =============================================================================

async fn list_variants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Vec<MenuVariant>>> {
    find_item(&state, &id).await?;
    let variants = state.db.menu().list_variants(&id).await?;
    Ok(ApiResponse::ok(variants, "Variants fetched successfully"))
}

async fn create_variant(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<CreateVariantInput>,
) -> ApiResult<ApiResponse<MenuVariant>> {
    let item = find_item(&state, &id).await?;
    let now = Utc::now();
    let variant = MenuVariant {
        id: generate_id(),
        menu_item_id: item.id,
        name: input.name.trim().to_string(),
        description: input.description,
        price_add_cents: input.price_add_cents,
        is_active: input.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };
    state.db.menu().insert_variant(&variant).await?;
    Ok(ApiResponse::created(variant, "Variant created successfully"))
}

async fn update_variant(
    State(state): State<AppState>,
    _actor: Actor,
    Path((id, variant_id)): Path<(String, String)>,
    ValidatedJson(input): ValidatedJson<UpdateVariantInput>,
) -> ApiResult<ApiResponse<MenuVariant>> {
    let mut variant = state
        .db
        .menu()
        .get_variant(&id, &variant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu variant", &variant_id))?;

    if let Some(name) = input.name {
        variant.name = name.trim().to_string();
    }
    if let Some(description) = input.description {
        variant.description = Some(description);
    }
    if let Some(price_add) = input.price_add_cents {
        variant.price_add_cents = price_add;
    }
    if let Some(is_active) = input.is_active {
        variant.is_active = is_active;
    }
    variant.updated_at = Utc::now();

    state.db.menu().update_variant(&variant).await?;
    Ok(ApiResponse::ok(variant, "Variant updated successfully"))
}

async fn delete_variant(
    State(state): State<AppState>,
    _actor: Actor,
    Path((id, variant_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<()>> {
    state.db.menu().delete_variant(&id, &variant_id).await?;
    Ok(ApiResponse::ok((), "Variant deleted successfully"))
}
