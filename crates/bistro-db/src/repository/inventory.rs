//! Inventory repository.

use bistro_core::InventoryItem;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for stock levels.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    pub async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, menu_item_id = %item.menu_item_id, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, menu_item_id, current_stock, min_stock, max_stock, unit, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.menu_item_id)
        .bind(item.current_stock)
        .bind(item.min_stock)
        .bind(item.max_stock)
        .bind(&item.unit)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, item: &InventoryItem) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items SET
                current_stock = ?2,
                min_stock = ?3,
                max_stock = ?4,
                unit = ?5,
                is_active = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(item.current_stock)
        .bind(item.min_stock)
        .bind(item.max_stock)
        .bind(&item.unit)
        .bind(item.is_active)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory item", &item.id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory item", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bistro_core::InventoryItem;
    use chrono::Utc;

    use crate::repository::generate_id;
    use crate::repository::test_support::*;

    #[tokio::test]
    async fn test_insert_update_round_trip() {
        let db = test_db().await;
        let mains = seed_category(&db, "Mains").await;
        let burger = seed_item(&db, &mains, "Burger", 1000).await;
        let now = Utc::now();
        let mut stock = InventoryItem {
            id: generate_id(),
            menu_item_id: burger.id.clone(),
            current_stock: 40,
            min_stock: 10,
            max_stock: None,
            unit: "patties".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.inventory().insert(&stock).await.unwrap();

        stock.current_stock = 8;
        db.inventory().update(&stock).await.unwrap();

        let stored = db.inventory().get_by_id(&stock.id).await.unwrap().unwrap();
        assert_eq!(stored.current_stock, 8);
        assert!(stored.is_low_stock());
        assert_eq!(db.inventory().list().await.unwrap().len(), 1);
    }
}
