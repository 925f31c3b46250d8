//! # Catalog Query Service
//!
//! Read-only product lookups plus explicit catalog creation. Simple enough to
//! be a pass-through over the record store; the only rule of its own is input
//! validation on creation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::RecordStore;
use crate::types::Product;
use crate::validation;

/// Product catalog queries and creation, generic over the record store.
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: RecordStore> Catalog<S> {
    /// Creates a catalog over the given record store.
    pub fn new(store: S) -> Self {
        Catalog { store }
    }

    /// Gets a product by id.
    ///
    /// ## Errors
    /// `ProductNotFound` if the id does not resolve.
    pub async fn product_by_id(&self, id: &str) -> CoreResult<Product> {
        self.store
            .product_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Lists products whose title matches exactly.
    ///
    /// Returns an empty sequence (not an error) when nothing matches.
    pub async fn products_by_title(&self, title: &str) -> CoreResult<Vec<Product>> {
        Ok(self.store.products_by_title(title).await?)
    }

    /// Lists all products, optionally filtered to those in stock
    /// (inventory_count > 0).
    pub async fn all_products(&self, in_stock_only: bool) -> CoreResult<Vec<Product>> {
        Ok(self.store.all_products(in_stock_only).await?)
    }

    /// Creates a new catalog product.
    ///
    /// Validates the title, a non-negative price and a non-negative inventory
    /// count, then persists. The price is rendered to decimal text once here;
    /// everything downstream relies on it being well-formed.
    pub async fn create_product(
        &self,
        title: &str,
        price: Decimal,
        inventory_count: i64,
    ) -> CoreResult<Product> {
        let title = validation::validate_title(title)?;
        validation::validate_price(price)?;
        validation::validate_inventory_count(inventory_count)?;

        let product = Product::new(title, price.to_string(), inventory_count);
        debug!(id = %product.id, title = %product.title, "Creating product");

        self.store.insert_product(&product).await?;
        Ok(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn create_then_fetch_by_id() {
        let catalog = Catalog::new(MemoryStore::new());

        let created = catalog.create_product("Widget", dec!(9.99), 3).await.unwrap();
        let fetched = catalog.product_by_id(&created.id).await.unwrap();

        assert_eq!(fetched.title, "Widget");
        assert_eq!(fetched.price, "9.99");
        assert_eq!(fetched.inventory_count, 3);
    }

    #[tokio::test]
    async fn missing_product_is_an_error_but_missing_title_is_not() {
        let catalog = Catalog::new(MemoryStore::new());

        let err = catalog.product_by_id("nope").await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));

        // Exact-title lookup yields an empty sequence, never an error
        assert!(catalog.products_by_title("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn title_match_is_exact() {
        let catalog = Catalog::new(MemoryStore::new());
        catalog.create_product("Widget", dec!(1), 1).await.unwrap();
        catalog.create_product("Widget", dec!(2), 1).await.unwrap();
        catalog.create_product("Widget XL", dec!(3), 1).await.unwrap();

        let matches = catalog.products_by_title("Widget").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|p| p.title == "Widget"));
    }

    #[tokio::test]
    async fn in_stock_filter_drops_exhausted_products() {
        let catalog = Catalog::new(MemoryStore::new());
        catalog.create_product("Stocked", dec!(1), 5).await.unwrap();
        catalog.create_product("Gone", dec!(1), 0).await.unwrap();

        let all = catalog.all_products(false).await.unwrap();
        assert_eq!(all.len(), 2);

        let in_stock = catalog.all_products(true).await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].title, "Stocked");
    }

    #[tokio::test]
    async fn creation_rejects_bad_input() {
        let catalog = Catalog::new(MemoryStore::new());

        let err = catalog.create_product("  ", dec!(1), 1).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = catalog.create_product("Widget", dec!(-1), 1).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = catalog.create_product("Widget", dec!(1), -1).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Zero price (free item) and zero inventory are both allowed
        assert!(catalog.create_product("Freebie", dec!(0), 0).await.is_ok());
    }
}
