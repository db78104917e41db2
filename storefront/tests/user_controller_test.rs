mod common;

use common::{create_user, test_app, user_body};
use serde_json::json;
use storefront::models::User;

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let app = test_app().await;

    let created: User = app
        .post("/users/")
        .json(&user_body(1))
        .send()
        .await
        .assert_ok()
        .json();
    assert_eq!(created.first_name, "First1");
    assert_eq!(created.password, "secret1");

    let fetched: User = app
        .get(&format!("/users/{}", created.id))
        .send()
        .await
        .assert_ok()
        .json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_every_created_row_in_id_order() {
    let app = test_app().await;
    app.get("/users/").send().await.assert_ok().assert_json_path("len()", 0);

    let mut ids = Vec::new();
    for n in 0..4 {
        ids.push(create_user(&app, n).await);
    }

    let users: Vec<User> = app.get("/users/").send().await.assert_ok().json();
    assert_eq!(users.len(), 4);
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), ids);
}

#[tokio::test]
async fn path_without_trailing_slash_is_the_same_resource() {
    let app = test_app().await;
    create_user(&app, 1).await;
    app.get("/users")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 1);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = test_app().await;
    let id = create_user(&app, 1).await;

    let replacement = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "engine",
    });
    app.put(&format!("/users/{id}"))
        .json(&replacement)
        .send()
        .await
        .assert_ok()
        .assert_json_path("id", id)
        .assert_json_path("first_name", "Ada");

    app.get(&format!("/users/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("first_name", "Ada")
        .assert_json_path("last_name", "Lovelace")
        .assert_json_path("email", "ada@example.com")
        .assert_json_path("password", "engine");
}

#[tokio::test]
async fn update_of_missing_row_echoes_input_without_creating_it() {
    let app = test_app().await;

    app.put("/users/999")
        .json(&user_body(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("id", 999)
        .assert_json_path("email", "person7@example.com");

    app.get("/users/999").send().await.assert_not_found();
    app.get("/users/").send().await.assert_json_path("len()", 0);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = test_app().await;
    let id = create_user(&app, 1).await;

    app.delete(&format!("/users/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("message", "User deleted");

    app.get(&format!("/users/{id}"))
        .send()
        .await
        .assert_not_found()
        .assert_json_path("error", "User not found");
}

#[tokio::test]
async fn delete_of_missing_row_still_confirms() {
    let app = test_app().await;
    app.delete("/users/42")
        .send()
        .await
        .assert_ok()
        .assert_json_path("message", "User deleted");
}

#[tokio::test]
async fn over_long_fields_are_rejected_and_nothing_is_stored() {
    let app = test_app().await;
    let mut body = user_body(1);
    body["first_name"] = json!("x".repeat(33));
    body["email"] = json!(format!("{}@example.com", "y".repeat(120)));

    let resp = app
        .post("/users/")
        .json(&body)
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("error", "Validation failed")
        .assert_json_path("details.len()", 2);
    let fields: Vec<String> = (0..2)
        .map(|i| resp.json_path(&format!("details[{i}].field")))
        .collect();
    assert!(fields.contains(&"first_name".to_string()));
    assert!(fields.contains(&"email".to_string()));

    app.get("/users/").send().await.assert_json_path("len()", 0);
}

#[tokio::test]
async fn limits_count_characters_not_bytes() {
    let app = test_app().await;
    let mut body = user_body(1);
    body["first_name"] = json!("é".repeat(32));
    app.post("/users/").json(&body).send().await.assert_ok();
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let app = test_app().await;
    app.post("/users/")
        .json(&json!({ "first_name": "only" }))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn non_numeric_id_is_a_json_bad_request() {
    let app = test_app().await;
    let resp = app.get("/users/abc").send().await.assert_bad_request();
    assert_eq!(resp.header("content-type"), Some("application/json"));
    let error: String = resp.json_path("error");
    assert!(error.contains("abc"), "unexpected error: {error}");
}
