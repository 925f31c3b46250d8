//! # Record Store Interface
//!
//! The persistence seam consumed by the cart engine and catalog.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Record Store Boundary                                │
//! │                                                                         │
//! │   CartEngine / Catalog                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   RecordStore trait (THIS FILE)   ← ids in, resolved records out       │
//! │         │                                                               │
//! │         ├── SqliteStore (storefront-db)   production                   │
//! │         └── MemoryStore (test_store)      engine unit tests            │
//! │                                                                         │
//! │  There is no inline "populate"-style hydration: every cross-record     │
//! │  reference is resolved through an explicit lookup taking an id.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each method is one transactional store round-trip. The engine performs
//! read-modify-write sequences across several calls with no locking; callers
//! serialize operations per cart/product or accept lost-update races.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Cart, CartLineItem, Product};

// =============================================================================
// Store Error
// =============================================================================

/// A generic persistence failure surfaced to the core.
///
/// The store implementation keeps its own richer error type; by the time a
/// failure crosses this boundary only the human-readable message matters,
/// since the core neither retries nor recovers.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    /// Creates a store error from any displayable source.
    pub fn new(message: impl Into<String>) -> Self {
        StoreError(message.into())
    }
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Inventory Decrement
// =============================================================================

/// One product decrement applied during cart completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDecrement {
    /// The product whose inventory is reduced.
    pub product_id: String,

    /// Units to subtract (the line item's quantity).
    pub qty: i64,
}

// =============================================================================
// Record Store Trait
// =============================================================================

/// Persistence operations for Product, Cart and CartLineItem records.
///
/// Implementations are cheap to clone (they wrap a connection pool or shared
/// map) and must be usable from concurrent tasks.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // -- products -------------------------------------------------------------

    /// Resolves a product by id.
    async fn product_by_id(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Lists products whose title matches exactly.
    async fn products_by_title(&self, title: &str) -> StoreResult<Vec<Product>>;

    /// Lists all products, optionally only those with inventory_count > 0.
    async fn all_products(&self, in_stock_only: bool) -> StoreResult<Vec<Product>>;

    /// Persists a new product.
    async fn insert_product(&self, product: &Product) -> StoreResult<()>;

    // -- carts ----------------------------------------------------------------

    /// Resolves a cart by id.
    async fn cart_by_id(&self, id: &str) -> StoreResult<Option<Cart>>;

    /// Persists a new cart.
    async fn insert_cart(&self, cart: &Cart) -> StoreResult<()>;

    /// Writes back a cart's accumulated total.
    async fn update_cart_total(&self, cart_id: &str, total: &str) -> StoreResult<()>;

    // -- line items -----------------------------------------------------------

    /// Resolves the live line item for a (cart, product) pair, if any.
    ///
    /// At most one live line item exists per pair.
    async fn line_item_for(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> StoreResult<Option<CartLineItem>>;

    /// Lists all live line items owned by a cart.
    async fn line_items_for_cart(&self, cart_id: &str) -> StoreResult<Vec<CartLineItem>>;

    /// Persists a new line item.
    async fn insert_line_item(&self, item: &CartLineItem) -> StoreResult<()>;

    /// Writes back a mutated line item (qty and total).
    async fn update_line_item(&self, item: &CartLineItem) -> StoreResult<()>;

    /// Deletes a line item record entirely.
    async fn delete_line_item(&self, id: &str) -> StoreResult<()>;

    // -- completion -----------------------------------------------------------

    /// Applies all inventory decrements and marks the cart completed, as one
    /// all-or-nothing store transaction.
    ///
    /// The engine validates every decrement first; implementations must still
    /// refuse to drive any inventory_count negative and roll back the whole
    /// batch on failure.
    async fn commit_completion(
        &self,
        cart_id: &str,
        decrements: &[InventoryDecrement],
    ) -> StoreResult<()>;
}
