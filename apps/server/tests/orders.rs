//! Order lifecycle over HTTP: pricing, table occupancy, status machine,
//! item additions and kitchen tickets.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_order_prices_and_occupies_table() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(1).await;

    let (status, body) = app.order_at_table(&table, &[(&item, 2)]).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let order = &body["data"];
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["totalAmountCents"], 2000);
    assert_eq!(order["taxAmountCents"], 200);
    assert_eq!(order["serviceChargeCents"], 100);
    assert_eq!(order["discountAmountCents"], 0);
    assert_eq!(order["finalAmountCents"], 2300);
    assert!(order["orderNumber"].as_str().unwrap().starts_with("ORD-"));

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["unitPriceCents"], 1000);
    assert_eq!(items[0]["totalPriceCents"], 2000);
    assert_eq!(items[0]["menuItemName"], "Ramen");
    assert_eq!(order["table"]["tableNumber"], 1);
    assert_eq!(order["creator"]["email"], common::EMAIL);

    assert_eq!(app.table_status(&table).await, "OCCUPIED");
}

#[tokio::test]
async fn test_create_order_applies_variant_surcharge() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Burger", 1200).await;
    let double = app.create_variant(&item, "Double", 300).await;

    let (status, body) = app
        .post(
            "/api/v1/orders",
            json!({
                "orderType": "TAKEAWAY",
                "customerName": "Sam",
                "orderItems": [{ "menuItemId": item, "variantId": double, "quantity": 1 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["totalAmountCents"], 1500);
    assert_eq!(body["data"]["items"][0]["variantName"], "Double");
    assert!(body["data"]["table"].is_null());
}

#[tokio::test]
async fn test_occupied_table_rejects_new_order() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(2).await;

    let (status, _) = app.order_at_table(&table, &[(&item, 1)]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.order_count().await, 1);

    let (status, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(app.order_count().await, 1);
    assert_eq!(app.table_status(&table).await, "OCCUPIED");
}

#[tokio::test]
async fn test_variant_of_other_item_is_not_found() {
    let app = TestApp::spawn().await;
    let pizza = app.create_menu_item("Pizza", 1500).await;
    let burger = app.create_menu_item("Burger", 1200).await;
    let large_pizza = app.create_variant(&pizza, "Large", 500).await;
    let table = app.create_table(3).await;

    let (status, _) = app
        .post(
            "/api/v1/orders",
            json!({
                "tableId": table,
                "orderType": "DINE_IN",
                "orderItems": [{ "menuItemId": burger, "variantId": large_pizza, "quantity": 1 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.order_count().await, 0);
    assert_eq!(app.table_status(&table).await, "AVAILABLE");
}

#[tokio::test]
async fn test_unavailable_item_is_rejected() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Soup", 800).await;
    let (status, _) = app
        .put(&format!("/api/v1/menu-items/{item}"), json!({ "isAvailable": false }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/v1/orders",
            json!({
                "orderType": "TAKEAWAY",
                "orderItems": [{ "menuItemId": item, "quantity": 1 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.order_count().await, 0);
}

#[tokio::test]
async fn test_create_order_validates_body() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/v1/orders",
            json!({ "orderType": "DINE_IN", "orderItems": [] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"][0]["field"], "orderItems");
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn test_status_must_follow_transition_table() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(4).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app.set_status(&order_id, "READY").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.set_status(&order_id, "IN_PREPARATION").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "IN_PREPARATION");
    assert_eq!(body["data"]["items"][0]["status"], "IN_PREPARATION");
    assert_eq!(app.table_status(&table).await, "OCCUPIED");
}

#[tokio::test]
async fn test_served_releases_table() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(5).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    for next in ["IN_PREPARATION", "READY", "SERVED"] {
        let (status, _) = app.set_status(&order_id, next).await;
        assert_eq!(status, StatusCode::OK, "moving to {next}");
    }

    assert_eq!(app.table_status(&table).await, "AVAILABLE");
    let (status, _) = app.order_at_table(&table, &[(&item, 1)]).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_failed_table_release_rolls_back_status() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(6).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    app.set_status(&order_id, "IN_PREPARATION").await;
    app.set_status(&order_id, "READY").await;

    sqlx::query(
        "CREATE TRIGGER block_table_update BEFORE UPDATE ON restaurant_tables \
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .execute(app.db.pool())
    .await
    .unwrap();

    let (status, body) = app.set_status(&order_id, "SERVED").await;
    assert!(status.is_server_error(), "{status} {body}");
    assert_eq!(body["message"], "Internal Server Error");

    let (_, body) = app.get(&format!("/api/v1/orders/{order_id}")).await;
    assert_eq!(body["data"]["status"], "READY");
    assert_eq!(body["data"]["items"][0]["status"], "READY");
    assert_eq!(app.table_status(&table).await, "OCCUPIED");
}

#[tokio::test]
async fn test_cancelled_order_is_terminal() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(7).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app.set_status(&order_id, "CANCELLED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.table_status(&table).await, "AVAILABLE");

    let (status, _) = app.set_status(&order_id, "PENDING").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancelling_served_order_keeps_reseated_table() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(14).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let first = body["data"]["id"].as_str().unwrap().to_string();
    for next in ["IN_PREPARATION", "READY", "SERVED"] {
        app.set_status(&first, next).await;
    }

    let (status, _) = app.order_at_table(&table, &[(&item, 1)]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.table_status(&table).await, "OCCUPIED");

    let (status, body) = app.set_status(&first, "CANCELLED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "CANCELLED");
    assert_eq!(app.table_status(&table).await, "OCCUPIED");

    let (status, _) = app.order_at_table(&table, &[(&item, 1)]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.order_count().await, 2);
}

// =============================================================================
// Add items
// =============================================================================

#[tokio::test]
async fn test_add_items_recomputes_totals() {
    let app = TestApp::spawn().await;
    let ramen = app.create_menu_item("Ramen", 1000).await;
    let tea = app.create_menu_item("Green Tea", 500).await;
    let table = app.create_table(8).await;
    let (_, body) = app.order_at_table(&table, &[(&ramen, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/v1/orders/{order_id}/items"),
            json!({ "items": [{ "menuItemId": tea, "quantity": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let order = &body["data"];
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_eq!(order["totalAmountCents"], 1500);
    assert_eq!(order["taxAmountCents"], 150);
    assert_eq!(order["serviceChargeCents"], 75);
    assert_eq!(order["finalAmountCents"], 1725);
}

#[tokio::test]
async fn test_add_items_to_cancelled_order_conflicts() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(9).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    app.set_status(&order_id, "CANCELLED").await;

    let (status, _) = app
        .put(
            &format!("/api/v1/orders/{order_id}/items"),
            json!({ "items": [{ "menuItemId": item, "quantity": 3 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = app.get(&format!("/api/v1/orders/{order_id}")).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["totalAmountCents"], 1000);
}

// =============================================================================
// Kitchen ticket
// =============================================================================

#[tokio::test]
async fn test_kitchen_ticket_prints_pending_lines() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(10).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 2)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(&format!("/api/v1/orders/{order_id}/kot"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let ticket = &body["data"];
    assert_eq!(ticket["tableNumber"], "10");
    assert_eq!(ticket["customerName"], "N/A");
    assert_eq!(ticket["items"][0]["name"], "Ramen");
    assert_eq!(ticket["items"][0]["variant"], "Standard");
    assert_eq!(ticket["items"][0]["quantity"], 2);
    assert_eq!(ticket["totalAmountCents"], 2000);
    assert_eq!(ticket["printedBy"], common::EMAIL);

    let (_, body) = app.get(&format!("/api/v1/orders/{order_id}")).await;
    assert_eq!(body["data"]["kotPrinted"], true);
    assert!(body["data"]["kotPrintedAt"].is_string());
}

#[tokio::test]
async fn test_kitchen_ticket_after_serving_needs_print_all() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let table = app.create_table(11).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    for next in ["IN_PREPARATION", "READY", "SERVED"] {
        app.set_status(&order_id, next).await;
    }

    let kot = format!("/api/v1/orders/{order_id}/kot");
    let (status, body) = app.post(&kot, json!({ "printAllItems": false })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No items to print");

    let (status, body) = app.post(&kot, json!({ "printAllItems": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_kitchen_ticket_without_body_prints_pending_lines() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Gyoza", 700).await;
    let table = app.create_table(15).await;
    let (_, body) = app.order_at_table(&table, &[(&item, 3)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/v1/orders/{order_id}/kot"),
            Some(&app.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["items"][0]["quantity"], 3);
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_list_orders_filters_by_status() {
    let app = TestApp::spawn().await;
    let item = app.create_menu_item("Ramen", 1000).await;
    let first = app.create_table(12).await;
    let second = app.create_table(13).await;
    app.order_at_table(&first, &[(&item, 1)]).await;
    let (_, body) = app.order_at_table(&second, &[(&item, 1)]).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    app.set_status(&order_id, "IN_PREPARATION").await;

    let (_, body) = app.get("/api/v1/orders").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/v1/orders?status=IN_PREPARATION").await;
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order_id.as_str());

    let (status, _) = app.get("/api/v1/orders/00000000-0000-0000-0000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
