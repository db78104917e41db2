mod common;

use common::{create_item, item_body, test_app};
use serde_json::json;
use storefront::models::Item;

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let app = test_app().await;

    let created: Item = app
        .post("/items/")
        .json(&item_body(2))
        .send()
        .await
        .assert_ok()
        .json();
    assert_eq!(created.name, "Item 2");
    assert_eq!(created.price, 11.5);

    let fetched: Item = app
        .get(&format!("/items/{}", created.id))
        .send()
        .await
        .assert_ok()
        .json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn negative_price_is_accepted() {
    let app = test_app().await;
    app.post("/items/")
        .json(&json!({ "name": "refund", "description": "", "price": -3.25 }))
        .send()
        .await
        .assert_ok()
        .assert_json_path("price", -3.25);
}

#[tokio::test]
async fn integer_price_is_read_as_float() {
    let app = test_app().await;
    let id = app
        .post("/items/")
        .json(&json!({ "name": "mug", "description": "ceramic", "price": 4 }))
        .send()
        .await
        .assert_ok()
        .json_path::<i64>("id");
    let item: Item = app.get(&format!("/items/{id}")).send().await.json();
    assert_eq!(item.price, 4.0);
}

#[tokio::test]
async fn list_after_creates() {
    let app = test_app().await;
    for n in 0..3 {
        create_item(&app, n).await;
    }
    app.get("/items/")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 3)
        .assert_json_path("[2].name", "Item 2");
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = test_app().await;
    let id = create_item(&app, 1).await;

    app.put(&format!("/items/{id}"))
        .json(&json!({ "name": "lamp", "description": "brass desk lamp", "price": 42.0 }))
        .send()
        .await
        .assert_ok();

    app.get(&format!("/items/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("name", "lamp")
        .assert_json_path("description", "brass desk lamp")
        .assert_json_path("price", 42.0);
}

#[tokio::test]
async fn description_limit_is_256_characters() {
    let app = test_app().await;
    let mut body = item_body(1);

    body["description"] = json!("d".repeat(256));
    app.post("/items/").json(&body).send().await.assert_ok();

    body["description"] = json!("d".repeat(257));
    app.post("/items/")
        .json(&body)
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("details[0].field", "description");
}

#[tokio::test]
async fn string_price_is_a_bad_request() {
    let app = test_app().await;
    app.post("/items/")
        .json(&json!({ "name": "x", "description": "y", "price": "cheap" }))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = test_app().await;
    let id = create_item(&app, 1).await;

    app.delete(&format!("/items/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("message", "Item deleted");
    app.get(&format!("/items/{id}")).send().await.assert_not_found();
}

#[tokio::test]
async fn update_of_missing_row_echoes_input_without_creating_it() {
    let app = test_app().await;

    app.put("/items/999")
        .json(&item_body(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("id", 999)
        .assert_json_path("name", "Item 7")
        .assert_json_path("price", 16.5);

    app.get("/items/999").send().await.assert_not_found();
    app.get("/items/").send().await.assert_json_path("len()", 0);
}

#[tokio::test]
async fn delete_of_missing_row_still_confirms() {
    let app = test_app().await;
    app.delete("/items/42")
        .send()
        .await
        .assert_ok()
        .assert_json_path("message", "Item deleted");
}

#[tokio::test]
async fn non_numeric_id_is_a_json_bad_request() {
    let app = test_app().await;
    for resp in [
        app.get("/items/abc").send().await,
        app.delete("/items/abc").send().await,
    ] {
        let error: String = resp.assert_bad_request().json_path("error");
        assert!(error.contains("abc"), "unexpected error: {error}");
    }
}
