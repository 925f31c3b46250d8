//! # storefront-db: Record Store for Storefront
//!
//! SQLite-backed persistence for products, carts and cart line items, using
//! sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Data Flow                               │
//! │                                                                         │
//! │  CartEngine / Catalog (storefront-core)                                │
//! │       │  RecordStore trait                                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   storefront-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │   SqlitePool  │    │ (cart.rs)     │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                      ┌─────────▼─────────┐                     │   │
//! │  │                      │   SqliteStore     │  impl RecordStore   │   │
//! │  │                      │   (store.rs)      │  + transactional    │   │
//! │  │                      └───────────────────┘    completion       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./storefront.db")).await?;
//! let engine = storefront_core::CartEngine::new(db.store());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use store::SqliteStore;

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::product::ProductRepository;
