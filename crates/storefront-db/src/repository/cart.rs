//! # Cart Repository
//!
//! CRUD operations for carts and their line items.
//!
//! ## Responsibility Split
//! This repository only reads and writes rows. The ordering rules (reject
//! completed carts, clamp removals, keep totals in sync) live in the
//! `CartEngine` in storefront-core; the atomic completion write lives in
//! `SqliteStore::commit_completion`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use storefront_core::{Cart, CartLineItem};
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row shape for the `carts` table.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: String,
    total: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Cart {
            id: row.id,
            total: row.total,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Raw row shape for the `cart_items` table.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: String,
    cart_id: String,
    product_id: String,
    qty: i64,
    total: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartItemRow> for CartLineItem {
    fn from(row: CartItemRow) -> Self {
        CartLineItem {
            id: row.id,
            cart_id: row.cart_id,
            product_id: row.product_id,
            qty: row.qty,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cart and line-item database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new cart repository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// Gets a cart by ID. Returns `None` if not found.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Cart>> {
        debug!(cart_id = %id, "Fetching cart by ID");

        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, total, completed, created_at, updated_at
            FROM carts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    /// Inserts a new cart.
    pub async fn insert(&self, cart: &Cart) -> DbResult<()> {
        debug!(cart_id = %cart.id, "Inserting cart");

        sqlx::query(
            r#"
            INSERT INTO carts (id, total, completed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.total)
        .bind(cart.completed)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a cart's running total.
    pub async fn update_total(&self, cart_id: &str, total: &str) -> DbResult<()> {
        debug!(cart_id = %cart_id, total = %total, "Updating cart total");

        sqlx::query(
            r#"
            UPDATE carts
            SET total = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(total)
        .bind(Utc::now())
        .bind(cart_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Gets the live line item for a (cart, product) pair, if any.
    ///
    /// The schema enforces at most one such row.
    pub async fn line_item_for(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> DbResult<Option<CartLineItem>> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT id, cart_id, product_id, qty, total, created_at, updated_at
            FROM cart_items
            WHERE cart_id = ? AND product_id = ?
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartLineItem::from))
    }

    /// Lists all live line items for a cart, oldest first.
    pub async fn items_for_cart(&self, cart_id: &str) -> DbResult<Vec<CartLineItem>> {
        debug!(cart_id = %cart_id, "Fetching cart line items");

        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT id, cart_id, product_id, qty, total, created_at, updated_at
            FROM cart_items
            WHERE cart_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartLineItem::from).collect())
    }

    /// Inserts a new line item.
    pub async fn insert_item(&self, item: &CartLineItem) -> DbResult<()> {
        debug!(
            cart_id = %item.cart_id,
            product_id = %item.product_id,
            qty = item.qty,
            "Inserting line item"
        );

        sqlx::query(
            r#"
            INSERT INTO cart_items (id, cart_id, product_id, qty, total, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.cart_id)
        .bind(&item.product_id)
        .bind(item.qty)
        .bind(&item.total)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing line item's quantity and subtotal.
    pub async fn update_item(&self, item: &CartLineItem) -> DbResult<()> {
        debug!(item_id = %item.id, qty = item.qty, "Updating line item");

        sqlx::query(
            r#"
            UPDATE cart_items
            SET qty = ?, total = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(item.qty)
        .bind(&item.total)
        .bind(Utc::now())
        .bind(&item.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a line item by ID.
    pub async fn delete_item(&self, id: &str) -> DbResult<()> {
        debug!(item_id = %id, "Deleting line item");

        sqlx::query("DELETE FROM cart_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
