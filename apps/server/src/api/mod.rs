//! # HTTP API
//!
//! ```text
//! /api/v1
//!   ├── /health            GET                       (open)
//!   ├── /users             register, login (open) · logout, list, profile
//!   ├── /categories        CRUD
//!   ├── /menu-items        CRUD + /{id}/variants CRUD
//!   ├── /tables            list, create, status, delete
//!   ├── /inventory         CRUD
//!   ├── /orders            list, get, create, items, status, kot
//!   └── /dashboard         GET
//! ```
//!
//! Handlers that take an [`Actor`](crate::auth::Actor) argument require a
//! valid access token; the rest are open.

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod menu_items;
pub mod orders;
pub mod tables;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::AppState;

/// Version prefix for every route.
pub const API_PREFIX: &str = "/api/v1";

/// All API routes, without the version prefix.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/users", users::routes())
        .nest("/categories", categories::routes())
        .nest("/menu-items", menu_items::routes())
        .nest("/tables", tables::routes())
        .nest("/inventory", inventory::routes())
        .nest("/orders", orders::routes())
        .nest("/dashboard", dashboard::routes())
}
