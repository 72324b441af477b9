// tests/http_api.rs
mod common;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use warehouse_api::app_router;

fn app(store: Arc<MemoryStore>) -> Router {
    app_router(test_state(store), 1024 * 1024)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_and_welcome() {
    let app = app(MemoryStore::new());
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Warehouse Management");
}

#[tokio::test]
async fn readiness_reflects_store() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    store.set_failing(true);
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn product_lifecycle_over_http() {
    let app = app(MemoryStore::new());

    let (status, created) = send(
        &app,
        Method::POST,
        "/Products",
        Some(json!({"name": "Forklift", "price": 15000.0, "quantity": 2, "company": "Lift Co"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], Value::Null);
    assert_eq!(created["company"], "Lift Co");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/Products?id={}", id),
        Some(json!({
            "name": "Electric forklift",
            "description": "2t capacity",
            "price": 18000.5,
            "quantity": 1,
            "company": null,
            "delivery_partner": "HeavyHaul"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": id,
            "name": "Electric forklift",
            "description": "2t capacity",
            "price": 18000.5,
            "quantity": 1,
            "company": null,
            "delivery_partner": "HeavyHaul"
        })
    );

    let (status, list) = send(&app, Method::GET, "/Products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([updated]));

    let (status, body) = send(&app, Method::DELETE, &format!("/Products?id={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Product deleted successfully"}));

    let (status, body) = send(&app, Method::GET, &format!("/Products/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Product not found");
}

#[tokio::test]
async fn product_errors_over_http() {
    let store = MemoryStore::new();
    let app = app(store.clone());
    let full = json!({"name": "Crate", "price": 3.0, "quantity": 9});

    let (status, _) = send(&app, Method::PUT, "/Products?id=99999", Some(full.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/Products?id=99999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::PUT, "/Products", Some(full.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = send(&app, Method::POST, "/Products", Some(json!({"name": "Crate", "price": 3.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "quantity is required");
    assert_eq!(store.product_count(), 0);

    store.set_failing(true);
    let (status, body) = send(&app, Method::POST, "/Products", Some(full)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Product creation failed");
    assert!(!body.to_string().contains("pool"));
}

#[tokio::test]
async fn admin_login_and_password_change_scenario() {
    let app = app(MemoryStore::new());

    let (status, body) = send(
        &app,
        Method::POST,
        "/admins/register",
        Some(json!({"email": "a@x.com", "name": "Ana", "password": "pw1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin registered successfully");
    assert_eq!(body["admin"]["email"], "a@x.com");
    assert!(body["admin"].get("hashed_password").is_none());
    assert!(!body.to_string().contains("argon2"));
    let id = body["admin"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::POST, "/admins/login", Some(json!({"email": "a@x.com", "password": "pw1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["admin"]["id"].as_i64(), Some(id));

    let (status, wrong_pw) =
        send(&app, Method::POST, "/admins/login", Some(json!({"email": "a@x.com", "password": "wrong"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown) =
        send(&app, Method::POST, "/admins/login", Some(json!({"email": "z@x.com", "password": "pw1"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);

    let (status, body) = send(&app, Method::PUT, &format!("/admins/{}", id), Some(json!({"password": "pw2"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin updated successfully");
    assert_eq!(body["admin"]["name"], "Ana");

    let (status, _) = send(&app, Method::POST, "/admins/login", Some(json!({"email": "a@x.com", "password": "pw1"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::POST, "/admins/login", Some(json!({"email": "a@x.com", "password": "pw2"}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_management_over_http() {
    let app = app(MemoryStore::new());
    let (_, first) = send(&app, Method::POST, "/admins/register", Some(json!({"email": "a@x.com", "password": "pw1"}))).await;
    let (_, second) = send(&app, Method::POST, "/admins/register", Some(json!({"email": "b@x.com", "password": "pw2"}))).await;
    let second_id = second["admin"]["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, Method::POST, "/admins/register", Some(json!({"email": "a@x.com", "password": "again"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");

    let (status, body) = send(&app, Method::POST, "/admins/register", Some(json!({"email": "not-an-email", "password": "pw"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) =
        send(&app, Method::PUT, &format!("/admins/{}", second_id), Some(json!({"email": "a@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already in use");

    let (status, list) = send(&app, Method::GET, "/admins", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([first["admin"], second["admin"]]));

    let (status, body) = send(&app, Method::GET, &format!("/admins/{}", second_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, second["admin"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/admins/{}", second_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Admin deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &format!("/admins/{}", second_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/admins/{}", second_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/admins/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
