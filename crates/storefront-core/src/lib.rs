//! # storefront-core: Pure Business Logic for Storefront
//!
//! This crate is the **heart** of the order-management backend. It contains
//! the cart-mutation and inventory-settlement rules with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   API Surface (apps/api-server)                 │   │
//! │  │   getCart, addProductToCart, completeCart, createProduct, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  engine   │  │  catalog  │  │   │
//! │  │   │  Product  │  │  decimal  │  │ add/remove│  │  queries  │  │   │
//! │  │   │   Cart    │  │accumulator│  │ complete  │  │  creation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • STORE ACCESS VIA TRAIT ONLY       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RecordStore trait                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Record Store)                    │   │
//! │  │            SQLite queries, migrations, transactions             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Cart, CartLineItem)
//! - [`money`] - Decimal accumulator over decimal-text totals
//! - [`store`] - The RecordStore trait consumed by the engine
//! - [`engine`] - Cart Mutation Engine (AddItem / RemoveItem / CompleteCart)
//! - [`catalog`] - Read-only product queries plus catalog creation
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Input validation for catalog creation
//!
//! ## Design Principles
//!
//! 1. **Exact Decimals**: Monetary totals are decimal text, accumulated with
//!    `rust_decimal` - floating point never touches a total
//! 2. **Deferred Inventory Validation**: adding to a cart never checks stock;
//!    inventory is validated only when the cart is completed
//! 3. **Validate-All-Then-Commit-All**: completion decrements nothing until
//!    every line item has passed validation
//! 4. **Explicit Errors**: all failures are typed enum variants with
//!    human-readable messages

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::CartEngine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use store::{InventoryDecrement, RecordStore, StoreError, StoreResult};
pub use types::{Cart, CartLineItem, Product};
