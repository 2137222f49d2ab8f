//! # bistro-db: Database Layer for Bistro POS
//!
//! SQLite storage for the restaurant backend, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Data Flow                             │
//! │                                                                         │
//! │  HTTP handler (POST /orders)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderService (bistro-server) ── opens the transaction                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ MenuRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ TableRepo     │    │ 001_initial  │  │   │
//! │  │   │ begin() / tx  │    │ OrderRepo ... │    │   _schema    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (bistro.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, pooled connections, transactions
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per aggregate
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_db::{Database, DbConfig, TableRepository};
//!
//! let db = Database::new(DbConfig::new("bistro.db")).await?;
//!
//! // Simple reads go through the pool
//! let categories = db.categories().list().await?;
//!
//! // Multi-step writes share one transaction
//! let mut tx = db.begin().await?;
//! TableRepository::set_status(&mut tx, &table_id, TableStatus::Occupied).await?;
//! tx.commit().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::{
    generate_id, CategoryRepository, DashboardRepository, InventoryRepository, MenuRepository,
    OrderRepository, StoredUser, TableRepository, UserRepository,
};
