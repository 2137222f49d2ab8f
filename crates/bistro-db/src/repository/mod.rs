//! # Repository Module
//!
//! SQL for each aggregate, isolated behind a small API.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Simple CRUD (one statement, no transaction):                           │
//! │       db.categories().list()                                            │
//! │       db.tables().delete(id)                                            │
//! │                                                                         │
//! │  Order lifecycle (several statements, one transaction):                 │
//! │       let mut tx = db.begin().await?;                                   │
//! │       TableRepository::find(&mut tx, table_id)                          │
//! │       OrderRepository::insert(&mut tx, &order)                          │
//! │       OrderRepository::insert_items(&mut tx, &items)                    │
//! │       TableRepository::set_status(&mut tx, table_id, OCCUPIED)          │
//! │       tx.commit().await?;                                               │
//! │                                                                         │
//! │  Associated functions take `&mut SqliteConnection`, which both a        │
//! │  pooled connection and an open transaction deref to.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`] - Menu sections
//! - [`MenuRepository`] - Menu items and variants
//! - [`TableRepository`] - Dining tables and their occupancy
//! - [`InventoryRepository`] - Stock levels
//! - [`UserRepository`] - Staff accounts and credentials
//! - [`OrderRepository`] - Orders, order items, kitchen ticket flag
//! - [`DashboardRepository`] - Reporting aggregates

pub mod category;
pub mod dashboard;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod table;
pub mod user;

pub use category::CategoryRepository;
pub use dashboard::DashboardRepository;
pub use inventory::InventoryRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use table::TableRepository;
pub use user::{StoredUser, UserRepository};

/// Generates a new entity ID.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Shared fixtures for repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use bistro_core::{Category, DiningTable, MenuItem, MenuVariant, Role, TableStatus, User};
    use chrono::Utc;

    use super::generate_id;
    use crate::{Database, DbConfig};

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn seed_category(db: &Database, name: &str) -> Category {
        let now = Utc::now();
        let category = Category {
            id: generate_id(),
            name: name.to_string(),
            description: None,
            sort_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&category).await.unwrap();
        category
    }

    pub async fn seed_item(db: &Database, category: &Category, name: &str, cents: i64) -> MenuItem {
        let now = Utc::now();
        let item = MenuItem {
            id: generate_id(),
            name: name.to_string(),
            description: None,
            base_price_cents: cents,
            category_id: category.id.clone(),
            image_url: None,
            is_available: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.menu().insert_item(&item).await.unwrap();
        item
    }

    pub async fn seed_variant(db: &Database, item: &MenuItem, name: &str, cents: i64) -> MenuVariant {
        let now = Utc::now();
        let variant = MenuVariant {
            id: generate_id(),
            menu_item_id: item.id.clone(),
            name: name.to_string(),
            description: None,
            price_add_cents: cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.menu().insert_variant(&variant).await.unwrap();
        variant
    }

    pub async fn seed_table(db: &Database, number: i64) -> DiningTable {
        let now = Utc::now();
        let table = DiningTable {
            id: generate_id(),
            table_number: number,
            capacity: 4,
            location: None,
            status: TableStatus::Available,
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        db.tables().insert(&table).await.unwrap();
        table
    }

    pub async fn seed_user(db: &Database, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: generate_id(),
            first_name: "Sam".to_string(),
            last_name: "Server".to_string(),
            email: email.to_string(),
            phone: None,
            role: Role::Waiter,
            created_at: now,
            updated_at: now,
        };
        db.users().insert(&user, "not-a-real-hash").await.unwrap();
        user
    }
}
