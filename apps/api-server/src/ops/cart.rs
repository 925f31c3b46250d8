//! # Cart Operations
//!
//! getCart, createCart, addProductToCart, removeProductFromCart, completeCart.
//!
//! Each handler builds a `CartEngine` over the request's store handle, runs
//! one engine operation, then re-reads the live line items to render the
//! cart's item-id list.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::{Cart, CartEngine, RecordStore};
use tracing::info;

use crate::error::{ApiError, ErrorCode};
use crate::ops::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// A cart rendered for API clients: line items as an id list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: String,
    pub items: Vec<String>,
    pub total: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCartArgs {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemArgs {
    pub product_id: String,
    pub cart_id: String,
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCartArgs {
    pub id: String,
}

/// Renders a cart with its live line-item ids.
async fn cart_response(store: &impl RecordStore, cart: Cart) -> Result<CartResponse, ApiError> {
    let items = store
        .line_items_for_cart(&cart.id)
        .await
        .map_err(|e| ApiError::new(ErrorCode::StoreFailure, e.to_string()))?
        .into_iter()
        .map(|item| item.id)
        .collect();

    Ok(CartResponse {
        id: cart.id,
        items,
        total: cart.total,
        completed: cart.completed,
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/getCart
pub async fn get_cart(
    State(state): State<AppState>,
    Json(args): Json<GetCartArgs>,
) -> Result<Json<CartResponse>, ApiError> {
    let store = state.db.store();
    let cart = store
        .cart_by_id(&args.id)
        .await
        .map_err(|e| ApiError::new(ErrorCode::StoreFailure, e.to_string()))?
        .ok_or_else(|| {
            ApiError::new(ErrorCode::CartNotFound, format!("Cart not found: {}", args.id))
        })?;

    Ok(Json(cart_response(&store, cart).await?))
}

/// POST /api/createCart
pub async fn create_cart(State(state): State<AppState>) -> Result<Json<CartResponse>, ApiError> {
    let engine = CartEngine::new(state.db.store());
    let cart = engine.create_cart().await?;
    info!(cart_id = %cart.id, "Cart created");

    Ok(Json(CartResponse {
        id: cart.id,
        items: Vec::new(),
        total: cart.total,
        completed: cart.completed,
    }))
}

/// POST /api/addProductToCart
pub async fn add_product_to_cart(
    State(state): State<AppState>,
    Json(args): Json<CartItemArgs>,
) -> Result<Json<CartResponse>, ApiError> {
    let engine = CartEngine::new(state.db.store());
    let cart = engine
        .add_item(&args.product_id, &args.cart_id, args.qty)
        .await?;

    Ok(Json(cart_response(engine.store(), cart).await?))
}

/// POST /api/removeProductFromCart
pub async fn remove_product_from_cart(
    State(state): State<AppState>,
    Json(args): Json<CartItemArgs>,
) -> Result<Json<CartResponse>, ApiError> {
    let engine = CartEngine::new(state.db.store());
    let cart = engine
        .remove_item(&args.product_id, &args.cart_id, args.qty)
        .await?;

    Ok(Json(cart_response(engine.store(), cart).await?))
}

/// POST /api/completeCart
pub async fn complete_cart(
    State(state): State<AppState>,
    Json(args): Json<CompleteCartArgs>,
) -> Result<Json<CartResponse>, ApiError> {
    let engine = CartEngine::new(state.db.store());
    let cart = engine.complete_cart(&args.id).await?;
    info!(cart_id = %cart.id, total = %cart.total, "Cart completed");

    Ok(Json(cart_response(engine.store(), cart).await?))
}
