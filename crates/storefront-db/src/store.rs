//! # SQLite Record Store
//!
//! The production `RecordStore` implementation, backed by the connection
//! pool and delegating single-record operations to the repositories.
//!
//! ## Atomic Completion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              commit_completion (one SQLite transaction)                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    for each decrement:                                                  │
//! │      UPDATE products SET inventory_count = inventory_count - qty        │
//! │      WHERE id = ? AND inventory_count >= qty                            │
//! │      └── 0 rows? inventory changed since validation → ROLLBACK          │
//! │    UPDATE carts SET completed = 1 WHERE id = ? AND completed = 0        │
//! │      └── 0 rows? cart vanished or completed concurrently → ROLLBACK     │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `inventory_count >= qty` guard re-checks what the engine validated,
//! because another completion may have committed between the engine's read
//! and this write.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use storefront_core::{
    Cart, CartLineItem, InventoryDecrement, Product, RecordStore, StoreResult,
};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::cart::CartRepository;
use crate::repository::product::ProductRepository;

/// SQLite-backed record store.
///
/// Cheap to clone; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    products: ProductRepository,
    carts: CartRepository,
}

impl SqliteStore {
    /// Creates a store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore {
            products: ProductRepository::new(pool.clone()),
            carts: CartRepository::new(pool.clone()),
            pool,
        }
    }

    /// Applies all decrements and the completed flag in one transaction.
    async fn commit_completion_tx(
        &self,
        cart_id: &str,
        decrements: &[InventoryDecrement],
    ) -> DbResult<()> {
        debug!(cart_id = %cart_id, count = decrements.len(), "Committing cart completion");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for dec in decrements {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET inventory_count = inventory_count - ?, updated_at = ?
                WHERE id = ? AND inventory_count >= ?
                "#,
            )
            .bind(dec.qty)
            .bind(now)
            .bind(&dec.product_id)
            .bind(dec.qty)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                warn!(
                    product_id = %dec.product_id,
                    qty = dec.qty,
                    "Inventory changed under completion, rolling back"
                );
                tx.rollback().await?;
                return Err(DbError::TransactionFailed(format!(
                    "insufficient inventory for product {}",
                    dec.product_id
                )));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE carts
            SET completed = 1, updated_at = ?
            WHERE id = ? AND completed = 0
            "#,
        )
        .bind(now)
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            warn!(cart_id = %cart_id, "Cart missing or already completed, rolling back");
            tx.rollback().await?;
            return Err(DbError::TransactionFailed(format!(
                "cart {cart_id} is missing or already completed"
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn product_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.products.get_by_id(id).await?)
    }

    async fn products_by_title(&self, title: &str) -> StoreResult<Vec<Product>> {
        Ok(self.products.list_by_title(title).await?)
    }

    async fn all_products(&self, in_stock_only: bool) -> StoreResult<Vec<Product>> {
        Ok(self.products.list_all(in_stock_only).await?)
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        Ok(self.products.insert(product).await?)
    }

    async fn cart_by_id(&self, id: &str) -> StoreResult<Option<Cart>> {
        Ok(self.carts.get_by_id(id).await?)
    }

    async fn insert_cart(&self, cart: &Cart) -> StoreResult<()> {
        Ok(self.carts.insert(cart).await?)
    }

    async fn update_cart_total(&self, cart_id: &str, total: &str) -> StoreResult<()> {
        Ok(self.carts.update_total(cart_id, total).await?)
    }

    async fn line_item_for(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> StoreResult<Option<CartLineItem>> {
        Ok(self.carts.line_item_for(cart_id, product_id).await?)
    }

    async fn line_items_for_cart(&self, cart_id: &str) -> StoreResult<Vec<CartLineItem>> {
        Ok(self.carts.items_for_cart(cart_id).await?)
    }

    async fn insert_line_item(&self, item: &CartLineItem) -> StoreResult<()> {
        Ok(self.carts.insert_item(item).await?)
    }

    async fn update_line_item(&self, item: &CartLineItem) -> StoreResult<()> {
        Ok(self.carts.update_item(item).await?)
    }

    async fn delete_line_item(&self, id: &str) -> StoreResult<()> {
        Ok(self.carts.delete_item(id).await?)
    }

    async fn commit_completion(
        &self,
        cart_id: &str,
        decrements: &[InventoryDecrement],
    ) -> StoreResult<()> {
        Ok(self.commit_completion_tx(cart_id, decrements).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
