//! # Named Operations
//!
//! One POST route per named operation. Argument bodies are flat camelCase
//! JSON objects; responses are the serialized records.
//!
//! ## Route Map
//! ```text
//! POST /api/getCart                 → cart::get_cart
//! POST /api/getProductById          → product::get_product_by_id
//! POST /api/getProductByTitle       → product::get_product_by_title
//! POST /api/getAllProducts          → product::get_all_products
//! POST /api/createCart              → cart::create_cart
//! POST /api/createProduct           → product::create_product
//! POST /api/addProductToCart        → cart::add_product_to_cart
//! POST /api/removeProductFromCart   → cart::remove_product_from_cart
//! POST /api/completeCart            → cart::complete_cart
//! GET  /health                      → health
//! ```

pub mod cart;
pub mod product;

use axum::routing::{get, post};
use axum::{extract::State, http::StatusCode, Router};
use storefront_db::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Builds the operation router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/getCart", post(cart::get_cart))
        .route("/api/getProductById", post(product::get_product_by_id))
        .route("/api/getProductByTitle", post(product::get_product_by_title))
        .route("/api/getAllProducts", post(product::get_all_products))
        .route("/api/createCart", post(cart::create_cart))
        .route("/api/createProduct", post(product::create_product))
        .route("/api/addProductToCart", post(cart::add_product_to_cart))
        .route(
            "/api/removeProductFromCart",
            post(cart::remove_product_from_cart),
        )
        .route("/api/completeCart", post(cart::complete_cart))
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness probe: verifies the database still answers queries.
async fn health(State(state): State<AppState>) -> StatusCode {
    if state.db.health_check().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use storefront_db::DbConfig;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        router(AppState { db })
    }

    async fn call(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_product_renders_decimal_text() {
        let app = app().await;
        let (status, body) = call(
            &app,
            "/api/createProduct",
            json!({"title": "Widget", "price": 10, "inventoryCount": 5}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Widget");
        assert_eq!(body["price"], "10");
        assert_eq!(body["inventoryCount"], 5);
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn full_checkout_over_http() {
        let app = app().await;

        let (_, product) = call(
            &app,
            "/api/createProduct",
            json!({"title": "Widget", "price": 10, "inventoryCount": 5}),
        )
        .await;
        let product_id = product["id"].as_str().unwrap().to_string();

        let (status, cart) = call(&app, "/api/createCart", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["total"], "0");
        assert_eq!(cart["completed"], false);
        let cart_id = cart["id"].as_str().unwrap().to_string();

        let (status, cart) = call(
            &app,
            "/api/addProductToCart",
            json!({"productId": product_id, "cartId": cart_id, "qty": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["total"], "30");
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);

        let (status, cart) = call(&app, "/api/completeCart", json!({"id": cart_id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["completed"], true);

        // Completion is not idempotent
        let (status, err) = call(&app, "/api/completeCart", json!({"id": cart_id})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "CART_ALREADY_COMPLETED");
    }

    #[tokio::test]
    async fn over_subscription_surfaces_conflict() {
        let app = app().await;

        let (_, product) = call(
            &app,
            "/api/createProduct",
            json!({"title": "Scarce", "price": 1, "inventoryCount": 2}),
        )
        .await;
        let product_id = product["id"].as_str().unwrap().to_string();

        let (_, cart) = call(&app, "/api/createCart", json!({})).await;
        let cart_id = cart["id"].as_str().unwrap().to_string();

        // Adds are not inventory-checked
        let (status, _) = call(
            &app,
            "/api/addProductToCart",
            json!({"productId": product_id, "cartId": cart_id, "qty": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, err) = call(&app, "/api/completeCart", json!({"id": cart_id})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "INSUFFICIENT_INVENTORY");
        assert!(err["message"].as_str().unwrap().contains("Scarce"));
    }

    #[tokio::test]
    async fn missing_records_map_to_not_found() {
        let app = app().await;

        let (status, err) = call(&app, "/api/getCart", json!({"id": "nope"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["code"], "CART_NOT_FOUND");

        let (status, err) = call(&app, "/api/getProductById", json!({"id": "nope"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["code"], "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn get_all_products_honors_stock_filter() {
        let app = app().await;

        call(
            &app,
            "/api/createProduct",
            json!({"title": "Stocked", "price": 1, "inventoryCount": 4}),
        )
        .await;
        call(
            &app,
            "/api/createProduct",
            json!({"title": "Gone", "price": 1, "inventoryCount": 0}),
        )
        .await;

        let (_, all) = call(&app, "/api/getAllProducts", json!({})).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, in_stock) = call(&app, "/api/getAllProducts", json!({"inStockOnly": true})).await;
        let in_stock = in_stock.as_array().unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0]["title"], "Stocked");
    }
}
