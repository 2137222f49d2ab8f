//! `/orders` handlers.

use axum::extract::{Path, Query, State};
use axum::Router;
use axum::routing::{get, post, put};
use bistro_core::input::{
    AddItemsInput, CreateOrderInput, OrderFilter, PrintTicketInput, UpdateOrderStatusInput,
};
use bistro_core::kitchen::KitchenTicket;
use bistro_core::OrderDetail;

use crate::auth::Actor;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .route("/{id}/items", put(add_items))
        .route("/{id}/status", put(update_status))
        .route("/{id}/kot", post(print_ticket))
}

async fn list_orders(
    State(state): State<AppState>,
    _actor: Actor,
    Query(filter): Query<OrderFilter>,
) -> ApiResult<ApiResponse<Vec<OrderDetail>>> {
    let orders = state.orders.list(&filter).await?;
    Ok(ApiResponse::ok(orders, "Orders fetched successfully"))
}

async fn get_order(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<OrderDetail>> {
    let order = state.orders.get(&id).await?;
    Ok(ApiResponse::ok(order, "Order fetched successfully"))
}

async fn create_order(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateOrderInput>,
) -> ApiResult<ApiResponse<OrderDetail>> {
    let order = state.orders.create_order(input, &actor).await?;
    Ok(ApiResponse::created(order, "Order created successfully"))
}

async fn add_items(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<AddItemsInput>,
) -> ApiResult<ApiResponse<OrderDetail>> {
    let order = state.orders.add_items(&id, &input.items).await?;
    Ok(ApiResponse::ok(order, "Items added successfully"))
}

async fn update_status(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatusInput>,
) -> ApiResult<ApiResponse<OrderDetail>> {
    let order = state.orders.update_status(&id, input.status).await?;
    Ok(ApiResponse::ok(order, "Order status updated successfully"))
}

async fn print_ticket(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    input: Option<ValidatedJson<PrintTicketInput>>,
) -> ApiResult<ApiResponse<KitchenTicket>> {
    let ValidatedJson(input) = input.unwrap_or_default();
    let ticket = state
        .orders
        .prepare_ticket(&id, input.print_all_items, &actor)
        .await?;
    Ok(ApiResponse::ok(ticket, "KOT prepared successfully"))
}
