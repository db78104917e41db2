#![allow(dead_code)]

use serde_json::{json, Value};
use storefront::config::DatabaseConfig;
use storefront::{router, AppState};
use storefront_test::TestApp;

/// A router over a fresh in-memory database with the schema created and
/// foreign keys unenforced, as in the default configuration.
pub async fn test_app() -> TestApp {
    test_app_with(false).await
}

pub async fn test_app_with(foreign_keys: bool) -> TestApp {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        foreign_keys,
        create_if_missing: true,
    };
    let pool = storefront::connect(&config).await.unwrap();
    storefront::schema::create_all(&pool).await.unwrap();
    TestApp::new(router(AppState::new(pool)))
}

pub fn user_body(n: u32) -> Value {
    json!({
        "first_name": format!("First{n}"),
        "last_name": format!("Last{n}"),
        "email": format!("person{n}@example.com"),
        "password": format!("secret{n}"),
    })
}

pub fn item_body(n: u32) -> Value {
    json!({
        "name": format!("Item {n}"),
        "description": format!("Description of item {n}"),
        "price": 9.5 + n as f64,
    })
}

/// Create a user and return its id.
pub async fn create_user(app: &TestApp, n: u32) -> i64 {
    app.post("/users/")
        .json(&user_body(n))
        .send()
        .await
        .assert_ok()
        .json_path("id")
}

pub async fn create_item(app: &TestApp, n: u32) -> i64 {
    app.post("/items/")
        .json(&item_body(n))
        .send()
        .await
        .assert_ok()
        .json_path("id")
}

pub async fn create_order(app: &TestApp, user_id: i64, item_id: i64, status: &str) -> i64 {
    app.post("/orders/")
        .json(&json!({ "user_id": user_id, "item_id": item_id, "status": status }))
        .send()
        .await
        .assert_ok()
        .json_path("id")
}
