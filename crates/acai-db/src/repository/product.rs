//! # Product Repository
//!
//! Database operations for the `products` table.
//!
//! Products are what the storefront menu shows ("Açaí Tradicional",
//! "Açaí Tropical", ...). The base price is only displayed on the card; the
//! order total always comes from the chosen size.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use acai_core::{Product, ProductRecord};

use super::{count_rows, delete_row, next_display_order, set_active, toggle_active, Table};
use crate::error::{DbError, DbResult};

const SELECT_PRODUCTS: &str = "SELECT id, name, description, base_price_cents, badge, display_order, is_active FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let menu = repo.list_all().await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, active or not, in display order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{} ORDER BY display_order, id", SELECT_PRODUCTS);
        let rows = sqlx::query_as::<_, ProductRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        rows.into_iter().map(to_product).collect()
    }

    /// Lists active rows as stored, for the catalog loader to validate.
    pub async fn list_active_records(&self) -> DbResult<Vec<ProductRecord>> {
        let sql = format!("{} WHERE is_active = 1 ORDER BY display_order, id", SELECT_PRODUCTS);
        let rows = sqlx::query_as::<_, ProductRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{} WHERE id = ?1", SELECT_PRODUCTS);
        let row = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(to_product).transpose()
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert (id should be generated beforehand)
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        let row = ProductRecord::from(product);

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, base_price_cents, badge,
                display_order, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.base_price_cents)
        .bind(&row.badge)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let row = ProductRecord::from(product);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                base_price_cents = ?4,
                badge = ?5,
                display_order = ?6,
                is_active = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.base_price_cents)
        .bind(&row.badge)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product permanently.
    ///
    /// Orders are never stored, so nothing references a product row.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        delete_row(&self.pool, Table::Products, id).await
    }

    /// Flips the active flag, returning the new value.
    pub async fn toggle_active(&self, id: &str) -> DbResult<bool> {
        toggle_active(&self.pool, Table::Products, id).await
    }

    /// Shows or hides a product on the storefront.
    pub async fn set_active(&self, id: &str, is_active: bool) -> DbResult<()> {
        set_active(&self.pool, Table::Products, id, is_active).await
    }

    /// Counts all products (for the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        count_rows(&self.pool, Table::Products).await
    }

    /// Display order for a product created now.
    pub async fn next_display_order(&self) -> DbResult<i32> {
        next_display_order(&self.pool, Table::Products).await
    }
}

fn to_product(row: ProductRecord) -> DbResult<Product> {
    let id = row.id.clone();
    Product::try_from(row).map_err(|e| DbError::invalid_row("product", id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use acai_core::Money;

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_optional_fields_round_trip() {
        let repo = repo().await;

        let mut product = Product::new("p1", "Açaí Tropical", Money::from_cents(1600));
        product.description = Some("Açaí com frutas tropicais".to_string());
        product.badge = Some("Novidade".to_string());
        repo.insert(&product).await.unwrap();

        assert_eq!(repo.get_by_id("p1").await.unwrap(), Some(product.clone()));

        product.badge = None;
        product.base_price = Money::from_cents(1700);
        repo.update(&product).await.unwrap();
        let stored = repo.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(stored.badge, None);
        assert_eq!(stored.base_price.cents(), 1700);
    }

    #[tokio::test]
    async fn test_inactive_products_are_listed_for_admin_only() {
        let repo = repo().await;
        repo.insert(&Product::new("p1", "Açaí Zero", Money::from_cents(1400))).await.unwrap();
        repo.insert(&Product::new("p2", "Açaí Power", Money::from_cents(1800))).await.unwrap();
        repo.set_active("p1", false).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
        let active = repo.list_active_records().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "p2");
    }

    #[tokio::test]
    async fn test_set_active_missing_product() {
        let repo = repo().await;
        assert!(matches!(
            repo.set_active("ghost", true).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
