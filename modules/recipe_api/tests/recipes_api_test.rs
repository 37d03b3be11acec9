//! Integration tests for owner-scoped recipe CRUD.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use common::{auth_json_request, auth_request, register_and_token, send, setup, TestApp};

async fn create_recipe(app: &TestApp, token: &str, body: serde_json::Value) -> serde_json::Value {
    let (status, body) = send(
        app,
        auth_json_request(Method::POST, "/recipes/", token, &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn sample_payload() -> serde_json::Value {
    json!({
        "title": "Sample recipe",
        "time_minutes": 22,
        "price": "5.25",
        "description": "Sample description",
        "link": "http://example.com/recipe.pdf"
    })
}

#[tokio::test]
async fn test_recipes_require_authentication() {
    let app = setup().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/recipes/")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_INVALID_TOKEN");
}

#[tokio::test]
async fn test_create_recipe_returns_detail() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let body = create_recipe(&app, &token, sample_payload()).await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["title"], "Sample recipe");
    assert_eq!(body["time_minutes"], 22);
    assert_eq!(body["price"], "5.25");
    assert_eq!(body["description"], "Sample description");
    assert_eq!(body["link"], "http://example.com/recipe.pdf");
}

#[tokio::test]
async fn test_create_recipe_defaults_optional_fields() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let body = create_recipe(
        &app,
        &token,
        json!({ "title": "Sample recipe", "time_minutes": 30, "price": "5.99" }),
    )
    .await;

    assert_eq!(body["description"], "");
    assert_eq!(body["link"], "");
}

#[tokio::test]
async fn test_create_recipe_accepts_numeric_price() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let body = create_recipe(
        &app,
        &token,
        json!({ "title": "Sample recipe", "time_minutes": 30, "price": 5.99 }),
    )
    .await;

    // The response renders the price as a decimal string
    assert_eq!(body["price"], "5.99");
}

#[tokio::test]
async fn test_create_recipe_ignores_owner_in_payload() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let mut payload = sample_payload();
    payload["user"] = json!(999);
    let created = create_recipe(&app, &token, payload).await;

    // Recipe is visible to its real owner despite the bogus user field
    let id = created["id"].as_i64().unwrap();
    let (status, body) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
}

#[tokio::test]
async fn test_create_recipe_validation() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let (status, body) = send(
        &app,
        auth_json_request(
            Method::POST,
            "/recipes/",
            &token,
            &json!({ "title": "  ", "time_minutes": 30, "price": "5.99" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["pointer"], "/title");

    let (status, body) = send(
        &app,
        auth_json_request(
            Method::POST,
            "/recipes/",
            &token,
            &json!({ "title": "Sample recipe", "time_minutes": -1, "price": "5.99" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["pointer"], "/time_minutes");
}

#[tokio::test]
async fn test_list_returns_summaries_newest_first() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;

    let first = create_recipe(
        &app,
        &token,
        json!({ "title": "First", "time_minutes": 5, "price": "1.00" }),
    )
    .await;
    let second = create_recipe(
        &app,
        &token,
        json!({ "title": "Second", "time_minutes": 10, "price": "2.50" }),
    )
    .await;

    let (status, body) = send(&app, auth_request(Method::GET, "/recipes/", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second["id"]);
    assert_eq!(items[1]["id"], first["id"]);

    // Summary shape: id, title, time_minutes, price, link - and nothing else
    let entry = items[0].as_object().unwrap();
    assert_eq!(entry.len(), 5);
    assert!(entry.get("description").is_none());
    assert_eq!(items[0]["price"], "2.50");
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let app = setup().await;
    let token_a = register_and_token(&app, "usera@example.com", "testpass123").await;
    let token_b = register_and_token(&app, "userb@example.com", "testpass123").await;

    create_recipe(
        &app,
        &token_a,
        json!({ "title": "A's dish", "time_minutes": 5, "price": "1.00" }),
    )
    .await;
    create_recipe(
        &app,
        &token_b,
        json!({ "title": "B's dish", "time_minutes": 5, "price": "1.00" }),
    )
    .await;

    let (_, body_a) = send(&app, auth_request(Method::GET, "/recipes/", &token_a)).await;
    let items_a = body_a.as_array().unwrap();
    assert_eq!(items_a.len(), 1);
    assert_eq!(items_a[0]["title"], "A's dish");

    let (_, body_b) = send(&app, auth_request(Method::GET, "/recipes/", &token_b)).await;
    let items_b = body_b.as_array().unwrap();
    assert_eq!(items_b.len(), 1);
    assert_eq!(items_b[0]["title"], "B's dish");
}

#[tokio::test]
async fn test_get_detail_includes_description() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token)).await;

    assert_eq!(status, StatusCode::OK);
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 6);
    assert_eq!(body["description"], "Sample description");
}

#[tokio::test]
async fn test_other_users_recipe_is_indistinguishable_from_missing() {
    let app = setup().await;
    let token_a = register_and_token(&app, "usera@example.com", "testpass123").await;
    let token_b = register_and_token(&app, "userb@example.com", "testpass123").await;

    let created = create_recipe(&app, &token_a, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (foreign_status, foreign_body) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token_b)).await;
    let (missing_status, missing_body) =
        send(&app, auth_request(Method::GET, "/recipes/999999", &token_b)).await;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body["code"], missing_body["code"]);
}

#[tokio::test]
async fn test_patch_updates_only_named_fields() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        auth_json_request(
            Method::PATCH,
            &format!("/recipes/{id}"),
            &token,
            &json!({ "title": "New title" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New title");
    assert_eq!(body["time_minutes"], 22);
    assert_eq!(body["price"], "5.25");
    assert_eq!(body["description"], "Sample description");
    assert_eq!(body["link"], "http://example.com/recipe.pdf");
}

#[tokio::test]
async fn test_patch_with_empty_body_changes_nothing() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        auth_json_request(Method::PATCH, &format!("/recipes/{id}"), &token, &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Sample recipe");
}

#[tokio::test]
async fn test_patch_ignores_owner_in_payload() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        auth_json_request(
            Method::PATCH,
            &format!("/recipes/{id}"),
            &token,
            &json!({ "user": 999 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Still owned by the original user
    let (get_status, _) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token)).await;
    assert_eq!(get_status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_validates_fields() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        auth_json_request(
            Method::PATCH,
            &format!("/recipes/{id}"),
            &token,
            &json!({ "time_minutes": -5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_replaces_and_resets_absent_optionals() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        auth_json_request(
            Method::PUT,
            &format!("/recipes/{id}"),
            &token,
            &json!({ "title": "Replaced", "time_minutes": 45, "price": "9.99" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Replaced");
    assert_eq!(body["time_minutes"], 45);
    assert_eq!(body["price"], "9.99");
    assert_eq!(body["description"], "");
    assert_eq!(body["link"], "");
}

#[tokio::test]
async fn test_put_requires_mandatory_fields() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        auth_json_request(
            Method::PUT,
            &format!("/recipes/{id}"),
            &token,
            &json!({ "time_minutes": 45 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_BODY");
}

#[tokio::test]
async fn test_mutations_on_foreign_recipes_return_404() {
    let app = setup().await;
    let token_a = register_and_token(&app, "usera@example.com", "testpass123").await;
    let token_b = register_and_token(&app, "userb@example.com", "testpass123").await;

    let created = create_recipe(&app, &token_a, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (patch_status, _) = send(
        &app,
        auth_json_request(
            Method::PATCH,
            &format!("/recipes/{id}"),
            &token_b,
            &json!({ "title": "Hijacked" }),
        ),
    )
    .await;
    assert_eq!(patch_status, StatusCode::NOT_FOUND);

    let (put_status, _) = send(
        &app,
        auth_json_request(
            Method::PUT,
            &format!("/recipes/{id}"),
            &token_b,
            &json!({ "title": "Hijacked", "time_minutes": 1, "price": "0.01" }),
        ),
    )
    .await;
    assert_eq!(put_status, StatusCode::NOT_FOUND);

    let (delete_status, _) =
        send(&app, auth_request(Method::DELETE, &format!("/recipes/{id}"), &token_b)).await;
    assert_eq!(delete_status, StatusCode::NOT_FOUND);

    // Untouched for the owner
    let (get_status, body) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token_a)).await;
    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(body["title"], "Sample recipe");
}

#[tokio::test]
async fn test_delete_recipe() {
    let app = setup().await;
    let token = register_and_token(&app, "test@example.com", "testpass123").await;
    let created = create_recipe(&app, &token, sample_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, auth_request(Method::DELETE, &format!("/recipes/{id}"), &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (get_status, _) =
        send(&app, auth_request(Method::GET, &format!("/recipes/{id}"), &token)).await;
    assert_eq!(get_status, StatusCode::NOT_FOUND);

    let (list_status, list_body) = send(&app, auth_request(Method::GET, "/recipes/", &token)).await;
    assert_eq!(list_status, StatusCode::OK);
    assert_eq!(list_body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_mutating_recipes_requires_authentication() {
    let app = setup().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipes/")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/recipes/1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
