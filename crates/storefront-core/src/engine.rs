//! # Cart Mutation Engine
//!
//! The core of the system: AddItem, RemoveItem and CompleteCart, each reading
//! current state from the record store, validating it, computing new totals
//! through the decimal accumulator, and writing back.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutation Engine                                 │
//! │                                                                         │
//! │  AddItem(product, cart, qty)                                           │
//! │    ├── resolve cart + product                                          │
//! │    ├── upsert line item for (cart, product): qty += n, total += Δ      │
//! │    └── cart.total += Δ          (Δ = price × qty, NO stock check)      │
//! │                                                                         │
//! │  RemoveItem(product, cart, qty)                                        │
//! │    ├── resolve cart + line item                                        │
//! │    ├── clamp qty to what is present                                    │
//! │    ├── qty hits zero? delete the record : write back qty/total         │
//! │    └── cart.total -= Δ                                                 │
//! │                                                                         │
//! │  CompleteCart(cart)                                                    │
//! │    ├── PHASE 1: validate EVERY line item against live inventory        │
//! │    └── PHASE 2: commit all decrements + completed flag in one          │
//! │                 store transaction (nothing is written during phase 1)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inventory is validated **only** at completion. Carts may be over-subscribed
//! relative to stock until completion is attempted; that is the deferred
//! validation policy, not a bug.

use chrono::Utc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money;
use crate::store::{InventoryDecrement, RecordStore};
use crate::types::{Cart, CartLineItem};

/// The cart mutation engine, generic over the record store.
///
/// ## Usage
/// ```rust,ignore
/// let engine = CartEngine::new(db.store());
/// let cart = engine.create_cart().await?;
/// let cart = engine.add_item(&product_id, &cart.id, 3).await?;
/// let cart = engine.complete_cart(&cart.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CartEngine<S> {
    store: S,
}

impl<S: RecordStore> CartEngine<S> {
    /// Creates an engine over the given record store.
    pub fn new(store: S) -> Self {
        CartEngine { store }
    }

    /// Creates and persists a new empty cart (total "0", not completed).
    pub async fn create_cart(&self) -> CoreResult<Cart> {
        let cart = Cart::new();
        debug!(cart_id = %cart.id, "Creating cart");

        self.store.insert_cart(&cart).await?;
        Ok(cart)
    }

    /// Adds `qty` units of a product to a cart.
    ///
    /// ## Behavior
    /// - A live line item for the (cart, product) pair is incremented in
    ///   place; otherwise a new line item is created with total
    ///   `"0" + price × qty`
    /// - The cart total is accumulated by the same delta after the line item
    ///   is persisted
    /// - Inventory is **not** checked here (deferred to completion)
    ///
    /// ## Errors
    /// `InvalidQuantity` (qty <= 0), `CartNotFound`, `ProductNotFound`,
    /// `CartAlreadyCompleted`.
    pub async fn add_item(&self, product_id: &str, cart_id: &str, qty: i64) -> CoreResult<Cart> {
        if qty <= 0 {
            return Err(CoreError::InvalidQuantity { qty });
        }

        debug!(product_id = %product_id, cart_id = %cart_id, qty = %qty, "AddItem");

        let mut cart = self.open_cart(cart_id).await?;
        let product = self
            .store
            .product_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let delta = money::line_delta(&product.price, qty);
        let now = Utc::now();

        match self.store.line_item_for(cart_id, product_id).await? {
            Some(mut item) => {
                item.qty += qty;
                item.total = money::add_to_total(&item.total, delta);
                item.updated_at = now;
                self.store.update_line_item(&item).await?;
            }
            None => {
                let item = CartLineItem::new(
                    cart_id,
                    product_id,
                    qty,
                    money::add_to_total(money::ZERO_TOTAL, delta),
                );
                self.store.insert_line_item(&item).await?;
            }
        }

        cart.total = money::add_to_total(&cart.total, delta);
        cart.updated_at = now;
        self.store.update_cart_total(&cart.id, &cart.total).await?;

        Ok(cart)
    }

    /// Removes `qty` units of a product from a cart.
    ///
    /// ## Over-removal
    /// Requesting more than is present is not an error: the removal is
    /// clamped to the line item's current quantity, the item is deleted, and
    /// the cart total drops by exactly the item's remaining subtotal. This
    /// keeps `cart.total == Σ live line totals` exact.
    ///
    /// ## Errors
    /// `InvalidQuantity` (qty <= 0), `CartNotFound`, `ItemNotInCart`,
    /// `CartAlreadyCompleted`, `DanglingCartItem` (the referenced product was
    /// deleted out from under the cart).
    pub async fn remove_item(&self, product_id: &str, cart_id: &str, qty: i64) -> CoreResult<Cart> {
        if qty <= 0 {
            return Err(CoreError::InvalidQuantity { qty });
        }

        debug!(product_id = %product_id, cart_id = %cart_id, qty = %qty, "RemoveItem");

        let mut cart = self.open_cart(cart_id).await?;
        let mut item = self
            .store
            .line_item_for(cart_id, product_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotInCart {
                cart_id: cart_id.to_string(),
                product_id: product_id.to_string(),
            })?;

        let product = self
            .store
            .product_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::DanglingCartItem {
                item_id: item.id.clone(),
                product_id: product_id.to_string(),
            })?;

        // Clamp so the cart-total delta tracks what was actually present
        let removed = qty.min(item.qty);
        let delta = money::line_delta(&product.price, removed);
        let now = Utc::now();

        if qty >= item.qty {
            // Quantity floors at deletion: the record is removed entirely
            self.store.delete_line_item(&item.id).await?;
        } else {
            item.qty -= qty;
            item.total = money::add_to_total(&item.total, -delta);
            item.updated_at = now;
            self.store.update_line_item(&item).await?;
        }

        cart.total = money::add_to_total(&cart.total, -delta);
        cart.updated_at = now;
        self.store.update_cart_total(&cart.id, &cart.total).await?;

        Ok(cart)
    }

    /// Completes a cart: validates every line item against live inventory,
    /// then commits all decrements and the completed flag atomically.
    ///
    /// ## Validate-All-Then-Commit-All
    /// No inventory is mutated until every line item has passed validation,
    /// so a failing item never leaves earlier items partially decremented.
    /// The commit itself is a single store transaction.
    ///
    /// ## Errors
    /// `CartNotFound`, `CartAlreadyCompleted` (completion is not idempotent),
    /// `InsufficientInventory` (first offending line item, with the product
    /// title, available count and requested qty), `DanglingCartItem`.
    pub async fn complete_cart(&self, cart_id: &str) -> CoreResult<Cart> {
        debug!(cart_id = %cart_id, "CompleteCart");

        let mut cart = self.open_cart(cart_id).await?;
        let items = self.store.line_items_for_cart(cart_id).await?;

        // Phase 1: validate everything, write nothing
        let mut decrements = Vec::with_capacity(items.len());
        for item in &items {
            let product = self
                .store
                .product_by_id(&item.product_id)
                .await?
                .ok_or_else(|| CoreError::DanglingCartItem {
                    item_id: item.id.clone(),
                    product_id: item.product_id.clone(),
                })?;

            if product.inventory_count < item.qty {
                return Err(CoreError::InsufficientInventory {
                    title: product.title,
                    available: product.inventory_count,
                    requested: item.qty,
                });
            }

            decrements.push(InventoryDecrement {
                product_id: item.product_id.clone(),
                qty: item.qty,
            });
        }

        // Phase 2: commit everything in one store transaction
        self.store.commit_completion(&cart.id, &decrements).await?;

        cart.completed = true;
        cart.updated_at = Utc::now();
        Ok(cart)
    }

    /// Resolves a cart that is still open for mutation.
    async fn open_cart(&self, cart_id: &str) -> CoreResult<Cart> {
        let cart = self
            .store
            .cart_by_id(cart_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_id.to_string()))?;

        if cart.completed {
            return Err(CoreError::CartAlreadyCompleted(cart.id));
        }

        Ok(cart)
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
