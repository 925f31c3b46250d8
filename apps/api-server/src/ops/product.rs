//! # Product Operations
//!
//! getProductById, getProductByTitle, getAllProducts, createProduct.

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::{Catalog, Product};
use tracing::info;

use crate::error::{ApiError, ErrorCode};
use crate::ops::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// A product rendered for API clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price: String,
    pub inventory_count: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            title: product.title,
            price: product.price,
            inventory_count: product.inventory_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductByIdArgs {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductByTitleArgs {
    pub title: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetAllProductsArgs {
    /// When true, only products with inventory_count > 0 are returned.
    #[serde(default)]
    pub in_stock_only: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductArgs {
    pub title: String,
    /// Price as a JSON number; rendered to decimal text at creation.
    pub price: f64,
    pub inventory_count: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/getProductById
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Json(args): Json<GetProductByIdArgs>,
) -> Result<Json<ProductResponse>, ApiError> {
    let catalog = Catalog::new(state.db.store());
    let product = catalog.product_by_id(&args.id).await?;
    Ok(Json(product.into()))
}

/// POST /api/getProductByTitle
pub async fn get_product_by_title(
    State(state): State<AppState>,
    Json(args): Json<GetProductByTitleArgs>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let catalog = Catalog::new(state.db.store());
    let products = catalog.products_by_title(&args.title).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/getAllProducts
pub async fn get_all_products(
    State(state): State<AppState>,
    Json(args): Json<GetAllProductsArgs>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let catalog = Catalog::new(state.db.store());
    let products = catalog.all_products(args.in_stock_only).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/createProduct
pub async fn create_product(
    State(state): State<AppState>,
    Json(args): Json<CreateProductArgs>,
) -> Result<Json<ProductResponse>, ApiError> {
    let price = Decimal::try_from(args.price).map_err(|_| {
        ApiError::new(
            ErrorCode::ValidationFailed,
            format!("price is not a representable decimal: {}", args.price),
        )
    })?;

    let catalog = Catalog::new(state.db.store());
    let product = catalog
        .create_product(&args.title, price, args.inventory_count)
        .await?;
    info!(product_id = %product.id, title = %product.title, "Product created");

    Ok(Json(product.into()))
}
