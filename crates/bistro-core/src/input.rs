//! # Request Payloads
//!
//! Bodies and query strings accepted by the HTTP API, with their
//! validation rules. Partial-update payloads treat a missing field as
//! "leave unchanged".

use serde::Deserialize;

use crate::menu::LineRequest;
use crate::types::{OrderStatus, OrderType, Role, TableStatus};
use crate::validation::{
    validate_email, validate_length, validate_lines, validate_non_negative,
    validate_optional_max, validate_password, validate_positive, validate_price, validate_uuid,
    Validate, ValidationResult,
};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

// =============================================================================
// Orders
// =============================================================================

/// `POST /orders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub table_id: Option<String>,
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub order_items: Vec<LineRequest>,
}

impl Validate for CreateOrderInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(table_id) = &self.table_id {
            validate_uuid("tableId", table_id)?;
        }
        if let Some(name) = &self.customer_name {
            validate_length("customerName", name, 1, NAME_MAX)?;
        }
        validate_lines("orderItems", &self.order_items)
    }
}

/// `PUT /orders/{id}/items`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsInput {
    pub items: Vec<LineRequest>,
}

impl Validate for AddItemsInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_lines("items", &self.items)
    }
}

/// `PUT /orders/{id}/status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusInput {
    pub status: OrderStatus,
}

impl Validate for UpdateOrderStatusInput {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

/// `POST /orders/{id}/kot`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTicketInput {
    #[serde(default)]
    pub print_all_items: bool,
}

impl Validate for PrintTicketInput {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

/// `GET /orders` query string. Filters are AND-combined.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub table_id: Option<String>,
}

// =============================================================================
// Categories
// =============================================================================

/// `POST /categories`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i64>,
}

impl Validate for CreateCategoryInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_length("name", &self.name, NAME_MIN, NAME_MAX)?;
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)
    }
}

/// `PUT /categories/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateCategoryInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_length("name", name, NAME_MIN, NAME_MAX)?;
        }
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)
    }
}

// =============================================================================
// Menu
// =============================================================================

/// `POST /menu-items`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "basePrice")]
    pub base_price_cents: i64,
    pub category_id: String,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
}

impl Validate for CreateMenuItemInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_length("name", &self.name, NAME_MIN, NAME_MAX)?;
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        validate_price("basePriceCents", self.base_price_cents, 1)?;
        validate_uuid("categoryId", &self.category_id)
    }
}

/// `PUT /menu-items/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "basePrice")]
    pub base_price_cents: Option<i64>,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateMenuItemInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_length("name", name, NAME_MIN, NAME_MAX)?;
        }
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        if let Some(price) = self.base_price_cents {
            validate_price("basePriceCents", price, 1)?;
        }
        if let Some(category_id) = &self.category_id {
            validate_uuid("categoryId", category_id)?;
        }
        Ok(())
    }
}

/// `POST /menu-items/{id}/variants`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariantInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "priceAdd")]
    pub price_add_cents: i64,
    pub is_active: Option<bool>,
}

impl Validate for CreateVariantInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_length("name", &self.name, NAME_MIN, NAME_MAX)?;
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        validate_price("priceAddCents", self.price_add_cents, 0)
    }
}

/// `PUT /menu-items/{id}/variants/{variant_id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVariantInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "priceAdd")]
    pub price_add_cents: Option<i64>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateVariantInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_length("name", name, NAME_MIN, NAME_MAX)?;
        }
        validate_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        if let Some(price_add) = self.price_add_cents {
            validate_price("priceAddCents", price_add, 0)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tables
// =============================================================================

/// `POST /tables`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableInput {
    pub table_number: i64,
    pub capacity: i64,
    pub location: Option<String>,
}

impl Validate for CreateTableInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_positive("tableNumber", self.table_number)?;
        validate_positive("capacity", self.capacity)?;
        validate_optional_max("location", self.location.as_deref(), NAME_MAX)
    }
}

/// `PUT /tables/{id}/status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableStatusInput {
    pub status: TableStatus,
}

impl Validate for UpdateTableStatusInput {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// `POST /inventory`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryInput {
    pub menu_item_id: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: Option<i64>,
    pub unit: String,
    pub is_active: Option<bool>,
}

impl Validate for CreateInventoryInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_uuid("menuItemId", &self.menu_item_id)?;
        validate_non_negative("minStock", self.min_stock)?;
        validate_length("unit", &self.unit, 1, 50)
    }
}

/// `PUT /inventory/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryInput {
    pub current_stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateInventoryInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(min_stock) = self.min_stock {
            validate_non_negative("minStock", min_stock)?;
        }
        if let Some(unit) = &self.unit {
            validate_length("unit", unit, 1, 50)?;
        }
        Ok(())
    }
}

// =============================================================================
// Users
// =============================================================================

/// `POST /users/register`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

impl Validate for RegisterUserInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_email("email", &self.email)?;
        validate_length("firstName", &self.first_name, 1, NAME_MAX)?;
        validate_length("lastName", &self.last_name, 1, NAME_MAX)?;
        validate_password("password", &self.password)
    }
}

/// `POST /users/login`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    fn validate(&self) -> ValidationResult<()> {
        validate_length("email", &self.email, 1, 254)?;
        validate_length("password", &self.password, 1, 1024)
    }
}

/// `PATCH /users` (own profile)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl Validate for UpdateProfileInput {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(first_name) = &self.first_name {
            validate_length("firstName", first_name, 1, NAME_MAX)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_length("lastName", last_name, 1, NAME_MAX)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_parses_wire_shape() {
        let json = serde_json::json!({
            "orderType": "DINE_IN",
            "tableId": "8f14e45f-ceea-4e7a-9d4b-0a1b2c3d4e5f",
            "orderItems": [
                { "menuItemId": "c9f0f895-fb98-4b9c-8a2d-1e2f3a4b5c6d", "quantity": 2 }
            ]
        });
        let input: CreateOrderInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.order_type, OrderType::DineIn);
        assert_eq!(input.order_items[0].quantity, 2);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_order_requires_items() {
        let input = CreateOrderInput {
            table_id: None,
            order_type: OrderType::Takeaway,
            customer_name: None,
            customer_phone: None,
            notes: None,
            order_items: vec![],
        };
        assert_eq!(input.validate().unwrap_err().field(), "orderItems");
    }

    #[test]
    fn test_print_ticket_defaults_to_pending_only() {
        let input: PrintTicketInput = serde_json::from_str("{}").unwrap();
        assert!(!input.print_all_items);
    }

    #[test]
    fn test_menu_item_accepts_base_price_alias() {
        let json = serde_json::json!({
            "name": "Tiramisu",
            "basePrice": 650,
            "categoryId": "8f14e45f-ceea-4e7a-9d4b-0a1b2c3d4e5f"
        });
        let input: CreateMenuItemInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.base_price_cents, 650);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_menu_item_rejects_zero_price() {
        let input = CreateMenuItemInput {
            name: "Water".to_string(),
            description: None,
            base_price_cents: 0,
            category_id: "8f14e45f-ceea-4e7a-9d4b-0a1b2c3d4e5f".to_string(),
            image_url: None,
            is_available: None,
            is_active: None,
        };
        assert_eq!(input.validate().unwrap_err().field(), "basePriceCents");
    }

    #[test]
    fn test_variant_surcharge_is_capped() {
        let input = CreateVariantInput {
            name: "Gold leaf".to_string(),
            description: None,
            price_add_cents: i64::MAX / 2,
            is_active: None,
        };
        assert_eq!(input.validate().unwrap_err().field(), "priceAddCents");

        let update = UpdateMenuItemInput {
            base_price_cents: Some(crate::MAX_PRICE_CENTS + 1),
            ..Default::default()
        };
        assert_eq!(update.validate().unwrap_err().field(), "basePriceCents");
    }

    #[test]
    fn test_unknown_status_rejected_by_serde() {
        let result: Result<UpdateOrderStatusInput, _> =
            serde_json::from_str(r#"{"status":"EATEN"}"#);
        assert!(result.is_err());
    }
}
