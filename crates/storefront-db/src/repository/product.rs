//! # Product Repository
//!
//! CRUD operations for catalog products.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use storefront_core::Product;
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row shape for the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    title: String,
    price: String,
    inventory_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            title: row.title,
            price: row.price,
            inventory_count: row.inventory_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new product repository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by ID. Returns `None` if not found.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        debug!(product_id = %id, "Fetching product by ID");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, inventory_count, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Lists products whose title matches exactly.
    ///
    /// Titles are not unique, so this can return more than one product.
    pub async fn list_by_title(&self, title: &str) -> DbResult<Vec<Product>> {
        debug!(title = %title, "Fetching products by title");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, inventory_count, created_at, updated_at
            FROM products
            WHERE title = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists all products, optionally restricted to those with inventory.
    pub async fn list_all(&self, in_stock_only: bool) -> DbResult<Vec<Product>> {
        debug!(in_stock_only, "Fetching product list");

        let sql = if in_stock_only {
            r#"
            SELECT id, title, price, inventory_count, created_at, updated_at
            FROM products
            WHERE inventory_count > 0
            ORDER BY title ASC
            "#
        } else {
            r#"
            SELECT id, title, price, inventory_count, created_at, updated_at
            FROM products
            ORDER BY title ASC
            "#
        };

        let rows = sqlx::query_as::<_, ProductRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(product_id = %product.id, title = %product.title, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, title, price, inventory_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.price)
        .bind(product.inventory_count)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn widget(title: &str, price: &str, count: i64) -> Product {
        Product::new(title, price, count)
    }

    #[tokio::test]
    async fn insert_and_get_by_id() {
        let repo = repo().await;
        let product = widget("Widget", "9.99", 3);

        repo.insert(&product).await.unwrap();

        let found = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Widget");
        assert_eq!(found.price, "9.99");
        assert_eq!(found.inventory_count, 3);
    }

    #[tokio::test]
    async fn get_by_id_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_by_title_is_exact_match() {
        let repo = repo().await;
        repo.insert(&widget("Mug", "4", 10)).await.unwrap();
        repo.insert(&widget("Mug", "5", 2)).await.unwrap();
        repo.insert(&widget("Mug XL", "6", 1)).await.unwrap();

        let mugs = repo.list_by_title("Mug").await.unwrap();
        assert_eq!(mugs.len(), 2);
        assert!(mugs.iter().all(|p| p.title == "Mug"));
    }

    #[tokio::test]
    async fn list_all_filters_out_of_stock() {
        let repo = repo().await;
        repo.insert(&widget("In stock", "1", 5)).await.unwrap();
        repo.insert(&widget("Sold out", "1", 0)).await.unwrap();

        let all = repo.list_all(false).await.unwrap();
        assert_eq!(all.len(), 2);

        let in_stock = repo.list_all(true).await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].title, "In stock");
    }
}
