//! # Domain Types
//!
//! Core domain types for the order-management backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Cart       │   │  CartLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title          │◄──┼──(via line     ─┼───│  product_id     │       │
//! │  │  price (text)   │   │    items)       │   │  cart_id        │       │
//! │  │  inventory_count│   │  total (text)   │   │  qty (> 0)      │       │
//! │  └─────────────────┘   │  completed      │   │  total (text)   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  A line item is owned by exactly one cart and references exactly one   │
//! │  product. At most one live line item exists per (cart, product).       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Live line item `qty` is always > 0 (qty reaching zero deletes the item)
//! - `Cart.total` equals the sum of its live line items' totals; both are
//!   maintained incrementally through the decimal accumulator
//! - `Cart.completed` is monotonic: false → true, never reset
//! - `Product.inventory_count` is never negative after a successful completion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

// =============================================================================
// Product
// =============================================================================

/// A product with finite inventory.
///
/// Mutated only by cart completion (inventory decrement) and created by
/// explicit catalog creation. Never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title; catalog lookups match it exactly.
    pub title: String,

    /// Unit price as decimal text, non-negative.
    pub price: String,

    /// Units currently in stock (>= 0).
    pub inventory_count: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with a generated id.
    ///
    /// Callers validate `title` and `price` first (see [`crate::validation`]);
    /// this constructor does not re-check them.
    pub fn new(title: impl Into<String>, price: impl Into<String>, inventory_count: i64) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            price: price.into(),
            inventory_count,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether at least one unit is in stock.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.inventory_count > 0
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A mutable basket of product quantities belonging to one checkout session.
///
/// ## State Machine
/// ```text
/// Open ──AddItem/RemoveItem──► Open ──CompleteCart──► Completed (terminal)
/// ```
/// No transition exists out of `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Running total as decimal text; always the sum of live line totals.
    pub total: String,

    /// Terminal flag, set once by CompleteCart.
    pub completed: bool,

    /// When the cart was created.
    pub created_at: DateTime<Utc>,

    /// When the cart was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart: no items, total "0", not completed.
    pub fn new() -> Self {
        let now = Utc::now();
        Cart {
            id: Uuid::new_v4().to_string(),
            total: money::ZERO_TOTAL.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// The quantity-and-subtotal record linking one product to one cart.
///
/// Owned exclusively by its cart; deleted outright (not zeroed) when its
/// quantity would fall to zero or below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The owning cart.
    pub cart_id: String,

    /// The referenced product.
    pub product_id: String,

    /// Quantity in the cart; > 0 while the item exists.
    pub qty: i64,

    /// Subtotal as decimal text (qty × price, accumulated incrementally).
    pub total: String,

    /// When the line item was created.
    pub created_at: DateTime<Utc>,

    /// When the line item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Creates a new line item with a generated id.
    pub fn new(
        cart_id: impl Into<String>,
        product_id: impl Into<String>,
        qty: i64,
        total: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        CartLineItem {
            id: Uuid::new_v4().to_string(),
            cart_id: cart_id.into(),
            product_id: product_id.into(),
            qty,
            total: total.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
