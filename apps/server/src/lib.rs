//! # Bistro Server
//!
//! HTTP API for the restaurant floor: menu, tables, orders, kitchen
//! tickets and the manager dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bistro Server                                   │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  api::*        │  │  OrderService  │  │  UserService               ││
//! │  │                │  │                │  │                            ││
//! │  │ • extractors   │─►│ • create_order │  │ • register / login         ││
//! │  │ • envelopes    │  │ • add_items    │  │ • logout / profile         ││
//! │  │ • /api/v1/...  │  │ • update_status│  │                            ││
//! │  │                │  │ • prepare_ticket│ │  DashboardService          ││
//! │  └────────────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │                              │ one transaction per operation            │
//! │  ┌───────────────────────────▼──────────────────────────────────────┐  │
//! │  │  bistro-db (SQLite)          bistro-core (pricing, FSM, KOT)     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ServerConfig`]. Environment variables use the `BISTRO_`
//! prefix (`BISTRO_PORT`, `BISTRO_DATABASE_PATH`, `BISTRO_JWT_SECRET`, ...).

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod services;

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use bistro_db::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

use crate::auth::JwtManager;
use crate::services::{DashboardService, OrderService, UserService};

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
    pub jwt: Arc<JwtManager>,
    pub orders: OrderService,
    pub users: UserService,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let jwt = Arc::new(JwtManager::new(
            config.jwt_secret.clone(),
            config.jwt_access_lifetime_secs,
            config.jwt_refresh_lifetime_secs,
        ));

        AppState {
            orders: OrderService::new(db.clone(), config.pricing()),
            users: UserService::new(db.clone(), jwt.clone()),
            dashboard: DashboardService::new(db.clone()),
            config: Arc::new(config),
            jwt,
            db,
        }
    }
}

/// The full application router, with tracing and CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest(api::API_PREFIX, api::routes())
        .layer(middleware::map_response_with_state(
            state.clone(),
            error::attach_stack,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
