//! Shared harness for API integration tests: a fresh in-memory database,
//! the real router, and small request helpers.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

use recipe_api::infra::storage;
use recipe_api::{router, ApiServices, RouterOptions};

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

/// Create a fresh application over an in-memory database.
pub async fn setup() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    storage::migrate(&db).await.expect("Failed to run migrations");

    let services = ApiServices::new(&db);
    let options = RouterOptions::default();
    let app = router(&services, &options).expect("Failed to build router");

    TestApp { router: app, db }
}

/// Like [`setup`] but the pool holds exactly one connection, so
/// concurrent requests interleave their queries on it.
pub async fn setup_single_connection() -> TestApp {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");

    storage::migrate(&db).await.expect("Failed to run migrations");

    let services = ApiServices::new(&db);
    let options = RouterOptions::default();
    let app = router(&services, &options).expect("Failed to build router");

    TestApp { router: app, db }
}

/// Same as [`setup`] but with /docs and /openapi.json enabled.
pub async fn setup_with_docs() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    storage::migrate(&db).await.expect("Failed to run migrations");

    let services = ApiServices::new(&db);
    let options = RouterOptions {
        enable_docs: true,
        ..RouterOptions::default()
    };
    let app = router(&services, &options).expect("Failed to build router");

    TestApp { router: app, db }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn auth_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn auth_json_request(method: Method, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request against the app and decode the response body as JSON.
/// Empty bodies come back as `Value::Null`.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, body)
}

/// Register a user through the API, asserting success.
pub async fn register_user(app: &TestApp, email: &str, password: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/users/create",
            &serde_json::json!({ "email": email, "password": password, "name": name }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body
}

/// Obtain a token through the API, asserting success.
pub async fn obtain_token(app: &TestApp, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/users/token",
            &serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "token request failed: {body}");
    body["token"]
        .as_str()
        .expect("token missing from response")
        .to_string()
}

/// Register a user and hand back a usable token in one step.
pub async fn register_and_token(app: &TestApp, email: &str, password: &str) -> String {
    register_user(app, email, password, "Test Name").await;
    obtain_token(app, email, password).await
}
