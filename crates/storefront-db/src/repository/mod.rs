//! # Repository Modules
//!
//! Data access layer - one repository per aggregate.
//!
//! ## Pattern
//! Each repository owns a clone of the `SqlitePool` (cheap, internally
//! Arc-based) and exposes typed async methods. Row structs derive
//! `sqlx::FromRow` and convert into the domain types from storefront-core.

pub mod cart;
pub mod product;

pub use cart::CartRepository;
pub use product::ProductRepository;
