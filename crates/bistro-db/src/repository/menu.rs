//! # Menu Repository
//!
//! Menu items and their variants.
//!
//! The order path reads the menu through [`MenuRepository::find_item`] and
//! [`MenuRepository::variants_for`] on the open transaction, so prices are
//! read from the same snapshot the order is written against.

use std::collections::HashMap;

use bistro_core::{MenuItem, MenuItemWithVariants, MenuVariant};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for menu items and variants.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    // =========================================================================
    // Connection-level reads (usable inside a transaction)
    // =========================================================================

    /// Fetches a menu item by id.
    pub async fn find_item(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(item)
    }

    /// All variants of a menu item, active or not.
    pub async fn variants_for(
        conn: &mut SqliteConnection,
        menu_item_id: &str,
    ) -> DbResult<Vec<MenuVariant>> {
        let variants = sqlx::query_as::<_, MenuVariant>(
            "SELECT * FROM menu_variants WHERE menu_item_id = ?1 ORDER BY price_add_cents, name",
        )
        .bind(menu_item_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(variants)
    }

    // =========================================================================
    // Menu items
    // =========================================================================

    /// Every menu item with its variants, by name.
    pub async fn list_with_variants(&self) -> DbResult<Vec<MenuItemWithVariants>> {
        let items = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let mut variants_by_item: HashMap<String, Vec<MenuVariant>> = HashMap::new();
        let variants = sqlx::query_as::<_, MenuVariant>(
            "SELECT * FROM menu_variants ORDER BY price_add_cents, name",
        )
        .fetch_all(&self.pool)
        .await?;
        for variant in variants {
            variants_by_item
                .entry(variant.menu_item_id.clone())
                .or_default()
                .push(variant);
        }

        Ok(items
            .into_iter()
            .map(|item| MenuItemWithVariants {
                variants: variants_by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }

    pub async fn get_item(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_item(&mut conn, id).await
    }

    /// One menu item with its variants.
    pub async fn get_item_with_variants(&self, id: &str) -> DbResult<Option<MenuItemWithVariants>> {
        let mut conn = self.pool.acquire().await?;
        let Some(item) = Self::find_item(&mut conn, id).await? else {
            return Ok(None);
        };
        let variants = Self::variants_for(&mut conn, id).await?;
        Ok(Some(MenuItemWithVariants { item, variants }))
    }

    pub async fn insert_item(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, price = item.base_price_cents, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, base_price_cents, category_id, image_url,
                is_available, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.base_price_cents)
        .bind(&item.category_id)
        .bind(&item.image_url)
        .bind(item.is_available)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites every mutable column.
    ///
    /// Existing order items keep their frozen unit prices.
    pub async fn update_item(&self, item: &MenuItem) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = ?2,
                description = ?3,
                base_price_cents = ?4,
                category_id = ?5,
                image_url = ?6,
                is_available = ?7,
                is_active = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.base_price_cents)
        .bind(&item.category_id)
        .bind(&item.image_url)
        .bind(item.is_available)
        .bind(item.is_active)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", &item.id));
        }

        Ok(())
    }

    /// Deletes a menu item (its variants cascade).
    ///
    /// Fails with a foreign key violation while orders still reference it.
    pub async fn delete_item(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        Ok(())
    }

    // =========================================================================
    // Variants
    // =========================================================================

    pub async fn list_variants(&self, menu_item_id: &str) -> DbResult<Vec<MenuVariant>> {
        let mut conn = self.pool.acquire().await?;
        Self::variants_for(&mut conn, menu_item_id).await
    }

    /// A variant, only if it belongs to `menu_item_id`.
    pub async fn get_variant(
        &self,
        menu_item_id: &str,
        variant_id: &str,
    ) -> DbResult<Option<MenuVariant>> {
        let variant = sqlx::query_as::<_, MenuVariant>(
            "SELECT * FROM menu_variants WHERE id = ?1 AND menu_item_id = ?2",
        )
        .bind(variant_id)
        .bind(menu_item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(variant)
    }

    pub async fn insert_variant(&self, variant: &MenuVariant) -> DbResult<()> {
        debug!(id = %variant.id, menu_item_id = %variant.menu_item_id, "Inserting menu variant");

        sqlx::query(
            r#"
            INSERT INTO menu_variants (
                id, menu_item_id, name, description, price_add_cents, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&variant.id)
        .bind(&variant.menu_item_id)
        .bind(&variant.name)
        .bind(&variant.description)
        .bind(variant.price_add_cents)
        .bind(variant.is_active)
        .bind(variant.created_at)
        .bind(variant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_variant(&self, variant: &MenuVariant) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE menu_variants SET
                name = ?3,
                description = ?4,
                price_add_cents = ?5,
                is_active = ?6,
                updated_at = ?7
            WHERE id = ?1 AND menu_item_id = ?2
            "#,
        )
        .bind(&variant.id)
        .bind(&variant.menu_item_id)
        .bind(&variant.name)
        .bind(&variant.description)
        .bind(variant.price_add_cents)
        .bind(variant.is_active)
        .bind(variant.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu variant", &variant.id));
        }

        Ok(())
    }

    pub async fn delete_variant(&self, menu_item_id: &str, variant_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_variants WHERE id = ?1 AND menu_item_id = ?2")
            .bind(variant_id)
            .bind(menu_item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu variant", variant_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use crate::DbError;

    #[tokio::test]
    async fn test_list_groups_variants_under_items() {
        let db = test_db().await;
        let mains = seed_category(&db, "Mains").await;
        let burger = seed_item(&db, &mains, "Burger", 1000).await;
        seed_item(&db, &mains, "Salad", 800).await;
        seed_variant(&db, &burger, "Double", 400).await;
        seed_variant(&db, &burger, "Cheese", 100).await;

        let menu = db.menu().list_with_variants().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].item.name, "Burger");
        let variant_names: Vec<&str> = menu[0].variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(variant_names, vec!["Cheese", "Double"]);
        assert!(menu[1].variants.is_empty());
    }

    #[tokio::test]
    async fn test_variant_scoped_to_its_item() {
        let db = test_db().await;
        let mains = seed_category(&db, "Mains").await;
        let burger = seed_item(&db, &mains, "Burger", 1000).await;
        let fries = seed_item(&db, &mains, "Fries", 400).await;
        let large = seed_variant(&db, &fries, "Large", 150).await;

        assert!(db.menu().get_variant(&fries.id, &large.id).await.unwrap().is_some());
        assert!(db.menu().get_variant(&burger.id, &large.id).await.unwrap().is_none());
        let err = db.menu().delete_variant(&burger.id, &large.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_category_is_foreign_key_violation() {
        let db = test_db().await;
        let mains = seed_category(&db, "Mains").await;
        let mut item = seed_item(&db, &mains, "Burger", 1000).await;
        item.category_id = "missing".to_string();
        let err = db.menu().update_item(&item).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
