//! Integration tests for API endpoints.
//!
//! The full router runs against an in-memory SQLite database, so every
//! request goes through the extractors, the product service and the store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, DbErr};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use product_listing_api::api::routes::create_router;
use product_listing_api::config::MSG_UNEXPECTED_ERROR;
use product_listing_api::errors::AppError;
use product_listing_api::{AppState, Database};

// =============================================================================
// Test Harness
// =============================================================================

async fn setup_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let database = Database::connect(options)
        .await
        .expect("in-memory database should open");
    create_router(AppState::from_database(Arc::new(database)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/products",
        Some(json!({
            "name": name,
            "description": "d",
            "manager": "Al",
            "password": "pw"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

fn timestamp(product: &Value, field: &str) -> DateTime<Utc> {
    serde_json::from_value(product[field].clone()).unwrap()
}

fn product_uri(product: &Value) -> String {
    format!("/products/{}", product["id"].as_str().unwrap())
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_product_lifecycle() {
    let app = setup_app().await;

    // Create
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "description": "d", "manager": "Al", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    let product = body["data"].clone();
    assert_eq!(product["name"], "Widget");
    assert_eq!(product["status"], "FOR_SALE");
    assert!(product.get("password").is_none());
    assert!(product.get("passwordHash").is_none());
    assert_eq!(product["createdAt"], product["updatedAt"]);
    let uri = product_uri(&product);

    // Same name again
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "description": "x", "manager": "B", "password": "q"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert!(body.get("data").is_none());

    // Wrong password
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"status": "SOLD_OUT", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["status"], "FOR_SALE");
    assert_eq!(body["data"]["updatedAt"], product["updatedAt"]);

    // Correct password
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"status": "SOLD_OUT", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = body["data"].clone();
    assert_eq!(updated["status"], "SOLD_OUT");
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["description"], "d");
    assert_eq!(updated["manager"], "Al");
    assert_eq!(updated["createdAt"], product["createdAt"]);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&product, "updatedAt"));
    assert!(updated.get("password").is_none());

    // Delete
    let (status, body) = send(&app, Method::DELETE, &uri, Some(json!({"password": "pw"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], product["id"]);
    assert!(body["data"].get("password").is_none());

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body.get("data").is_none());
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_missing_field() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "description": "d", "manager": "Al"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_create_blank_field() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "   ", "description": "d", "manager": "Al", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = setup_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_list_newest_first() {
    let app = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    create(&app, "older").await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    create(&app, "newer").await;

    let (_, body) = send(&app, Method::GET, "/products", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["newer", "older"]);
    assert!(body["data"][0].get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_and_malformed_id() {
    let app = setup_app().await;

    let (status, _) = send(&app, Method::GET, &format!("/products/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_unknown_status_leaves_record() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;
    let uri = product_uri(&product);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"status": "DISCONTINUED", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"], product);
}

#[tokio::test]
async fn test_update_blank_fields_left_unchanged() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &product_uri(&product),
        Some(json!({"name": "", "description": "", "status": "SOLD_OUT", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["status"], "SOLD_OUT");
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["description"], "d");
}

#[tokio::test]
async fn test_update_without_password() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;
    let uri = product_uri(&product);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"status": "SOLD_OUT"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["status"], "FOR_SALE");
}

#[tokio::test]
async fn test_update_only_password_touches_timestamp() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &product_uri(&product),
        Some(json!({"password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["name"], product["name"]);
    assert_eq!(updated["status"], product["status"]);
    assert!(timestamp(updated, "updatedAt") > timestamp(&product, "updatedAt"));
}

#[tokio::test]
async fn test_update_rename_to_taken_name() {
    let app = setup_app().await;
    create(&app, "Widget").await;
    let gadget = create(&app, "Gadget").await;
    let uri = product_uri(&gadget);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Widget", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Renaming to its own name is not a conflict
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Gadget", "description": "new", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "new");
}

#[tokio::test]
async fn test_update_unknown_id() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/products/{}", Uuid::new_v4()),
        Some(json!({"status": "SOLD_OUT", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_wrong_password_keeps_record() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;
    let uri = product_uri(&product);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(json!({"password": "nope"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unknown_and_malformed_id() {
    let app = setup_app().await;
    let unknown = format!("/products/{}", Uuid::new_v4());

    let (status, _) = send(&app, Method::DELETE, &unknown, Some(json!({"password": "pw"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/products/42",
        Some(json!({"password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_id_without_password() {
    let app = setup_app().await;
    let unknown = format!("/products/{}", Uuid::new_v4());

    let (status, body) = send(&app, Method::DELETE, &unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, _) = send(&app, Method::DELETE, &unknown, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_password_keeps_record() {
    let app = setup_app().await;
    let product = create(&app, "Widget").await;
    let uri = product_uri(&product);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Service Endpoints
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products"].is_object());
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    assert_eq!(
        AppError::validation("bad").status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::conflict("Product name").status(), StatusCode::CONFLICT);
    assert_eq!(
        AppError::internal("oops").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_internal_errors_are_not_leaked() {
    let response = AppError::Database(DbErr::Custom("connection refused at 10.0.0.1".into()))
        .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], MSG_UNEXPECTED_ERROR);
    assert!(body.get("data").is_none());
}
