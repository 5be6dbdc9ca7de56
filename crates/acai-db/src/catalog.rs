//! # Catalog Store Implementation
//!
//! Plugs the SQLite [`Database`] into the storefront's
//! [`CatalogLoader`](acai_core::CatalogLoader).
//!
//! Rows go out exactly as stored; validation, filtering and ordering are
//! the loader's job.

use async_trait::async_trait;
use tracing::error;

use acai_core::{CatalogStore, ComboRecord, ProductRecord, SizeRecord, StoreError, ToppingRecord};

use crate::error::DbError;
use crate::pool::Database;

fn store_error(entity: &'static str) -> impl FnOnce(DbError) -> StoreError {
    move |err| {
        error!(entity, error = %err, "Catalog fetch failed");
        StoreError::from(err)
    }
}

#[async_trait]
impl CatalogStore for Database {
    async fn fetch_sizes(&self) -> Result<Vec<SizeRecord>, StoreError> {
        self.sizes()
            .list_active_records()
            .await
            .map_err(store_error("size"))
    }

    async fn fetch_toppings(&self) -> Result<Vec<ToppingRecord>, StoreError> {
        self.toppings()
            .list_active_records()
            .await
            .map_err(store_error("topping"))
    }

    async fn fetch_combos(&self) -> Result<Vec<ComboRecord>, StoreError> {
        self.combos()
            .list_active_records()
            .await
            .map_err(store_error("combo"))
    }

    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        self.products()
            .list_active_records()
            .await
            .map_err(store_error("product"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use acai_core::{CatalogLoader, CoreError, Money, Size, Topping};

    #[tokio::test]
    async fn test_loader_reads_active_rows_in_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.sizes().insert(&Size::new("s2", "500ml", Money::from_cents(1800), 1)).await.unwrap();
        db.sizes().insert(&Size::new("s1", "300ml", Money::from_cents(1200), 0)).await.unwrap();
        db.sizes().insert(&Size::new("s3", "700ml", Money::from_cents(2400), 2)).await.unwrap();
        db.sizes().set_active("s3", false).await.unwrap();
        db.toppings().insert(&Topping::new("t1", "Granola", Money::from_cents(200), 0)).await.unwrap();

        let loader = CatalogLoader::new(db.clone());
        let (sizes, toppings) = tokio::join!(loader.load_sizes(), loader.load_toppings());

        let ids: Vec<String> = sizes.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert_eq!(toppings.unwrap().len(), 1);
        assert!(loader.load_combos().await.unwrap().is_empty());
        assert!(loader.load_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_pool_is_load_failure() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = CatalogLoader::new(db).load_sizes().await.unwrap_err();
        assert!(matches!(err, CoreError::LoadFailure(_)));
    }
}
