//! Shared harness for the HTTP integration tests.
//!
//! Every [`TestApp`] owns its own in-memory database and a logged-in
//! manager account; requests go through the real router via `oneshot`.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bistro_db::{Database, DbConfig};
use bistro_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const EMAIL: &str = "manager@bistro.test";
pub const PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub token: String,
}

impl TestApp {
    /// Fresh database, default pricing (10% tax, 5% service), one user.
    pub async fn spawn() -> Self {
        Self::spawn_with(ServerConfig::default()).await
    }

    pub async fn spawn_with(config: ServerConfig) -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let router = build_router(AppState::new(db.clone(), config));
        let mut app = TestApp {
            router,
            db,
            token: String::new(),
        };

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/users/register",
                None,
                Some(json!({
                    "firstName": "Maya",
                    "lastName": "Chef",
                    "email": EMAIL,
                    "password": PASSWORD,
                    "role": "MANAGER"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/users/login",
                None,
                Some(json!({ "email": EMAIL, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        app.token = body["data"]["accessToken"].as_str().unwrap().to_string();
        app
    }

    /// Sends a request, optionally with a bearer token and a JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&self.token), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&self.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&self.token), Some(body)).await
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    pub async fn create_category(&self, name: &str) -> String {
        let (status, body) = self
            .post("/api/v1/categories", json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a menu item (and a category for it) priced at `price_cents`.
    pub async fn create_menu_item(&self, name: &str, price_cents: i64) -> String {
        let category_id = self.create_category(&format!("{name} section")).await;
        let (status, body) = self
            .post(
                "/api/v1/menu-items",
                json!({
                    "name": name,
                    "basePriceCents": price_cents,
                    "categoryId": category_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_variant(&self, item_id: &str, name: &str, price_add_cents: i64) -> String {
        let (status, body) = self
            .post(
                &format!("/api/v1/menu-items/{item_id}/variants"),
                json!({ "name": name, "priceAddCents": price_add_cents }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_table(&self, number: i64) -> String {
        let (status, body) = self
            .post(
                "/api/v1/tables",
                json!({ "tableNumber": number, "capacity": 4 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Places a dine-in order for `lines` of `(menu_item_id, quantity)`.
    pub async fn order_at_table(&self, table_id: &str, lines: &[(&str, i64)]) -> (StatusCode, Value) {
        let items: Vec<Value> = lines
            .iter()
            .map(|(item, quantity)| json!({ "menuItemId": item, "quantity": quantity }))
            .collect();
        self.post(
            "/api/v1/orders",
            json!({
                "tableId": table_id,
                "orderType": "DINE_IN",
                "orderItems": items
            }),
        )
        .await
    }

    pub async fn set_status(&self, order_id: &str, status: &str) -> (StatusCode, Value) {
        self.put(
            &format!("/api/v1/orders/{order_id}/status"),
            json!({ "status": status }),
        )
        .await
    }

    pub async fn table_status(&self, table_id: &str) -> String {
        let (_, body) = self.get("/api/v1/tables").await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|table| table["id"] == table_id)
            .map(|table| table["status"].as_str().unwrap().to_string())
            .unwrap()
    }

    pub async fn order_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }
}
