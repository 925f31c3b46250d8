//! In-memory RecordStore used by engine and catalog unit tests.
//!
//! Mirrors the SQLite store's observable behavior, including all-or-nothing
//! completion: `commit_completion` applies every decrement and the completed
//! flag under one lock, or nothing at all.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::store::{InventoryDecrement, RecordStore, StoreError, StoreResult};
use crate::types::{Cart, CartLineItem, Product};

#[derive(Debug, Default)]
struct Records {
    products: HashMap<String, Product>,
    carts: HashMap<String, Cart>,
    items: HashMap<String, CartLineItem>,
}

/// Shared in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Deletes a product out from under its line items, to provoke
    /// DanglingCartItem paths.
    pub fn remove_product_for_test(&self, id: &str) {
        self.records.lock().unwrap().products.remove(id);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn product_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.records.lock().unwrap().products.get(id).cloned())
    }

    async fn products_by_title(&self, title: &str) -> StoreResult<Vec<Product>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .products
            .values()
            .filter(|p| p.title == title)
            .cloned()
            .collect())
    }

    async fn all_products(&self, in_stock_only: bool) -> StoreResult<Vec<Product>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .products
            .values()
            .filter(|p| !in_stock_only || p.inventory_count > 0)
            .cloned()
            .collect())
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        self.records
            .lock()
            .unwrap()
            .products
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn cart_by_id(&self, id: &str) -> StoreResult<Option<Cart>> {
        Ok(self.records.lock().unwrap().carts.get(id).cloned())
    }

    async fn insert_cart(&self, cart: &Cart) -> StoreResult<()> {
        self.records
            .lock()
            .unwrap()
            .carts
            .insert(cart.id.clone(), cart.clone());
        Ok(())
    }

    async fn update_cart_total(&self, cart_id: &str, total: &str) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();
        let cart = records
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::new(format!("Cart not found: {cart_id}")))?;
        cart.total = total.to_string();
        Ok(())
    }

    async fn line_item_for(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> StoreResult<Option<CartLineItem>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .items
            .values()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
            .cloned())
    }

    async fn line_items_for_cart(&self, cart_id: &str) -> StoreResult<Vec<CartLineItem>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect())
    }

    async fn insert_line_item(&self, item: &CartLineItem) -> StoreResult<()> {
        self.records
            .lock()
            .unwrap()
            .items
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_line_item(&self, item: &CartLineItem) -> StoreResult<()> {
        self.records
            .lock()
            .unwrap()
            .items
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn delete_line_item(&self, id: &str) -> StoreResult<()> {
        self.records.lock().unwrap().items.remove(id);
        Ok(())
    }

    async fn commit_completion(
        &self,
        cart_id: &str,
        decrements: &[InventoryDecrement],
    ) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();

        // Check the whole batch before touching anything
        for d in decrements {
            let product = records
                .products
                .get(&d.product_id)
                .ok_or_else(|| StoreError::new(format!("Product not found: {}", d.product_id)))?;
            if product.inventory_count < d.qty {
                return Err(StoreError::new(format!(
                    "Inventory underflow for product {}",
                    d.product_id
                )));
            }
        }
        if !records.carts.contains_key(cart_id) {
            return Err(StoreError::new(format!("Cart not found: {cart_id}")));
        }

        for d in decrements {
            if let Some(product) = records.products.get_mut(&d.product_id) {
                product.inventory_count -= d.qty;
            }
        }
        if let Some(cart) = records.carts.get_mut(cart_id) {
            cart.completed = true;
        }
        Ok(())
    }
}
