//! # Size Repository
//!
//! Database operations for the `sizes` table (300ml, 500ml, 700ml, ...).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use acai_core::{Size, SizeRecord};

use super::{count_rows, delete_row, next_display_order, set_active, toggle_active, Table};
use crate::error::{DbError, DbResult};

const SELECT_SIZES: &str = "SELECT id, name, price_cents, display_order, is_active FROM sizes";

/// Repository for size database operations.
#[derive(Debug, Clone)]
pub struct SizeRepository {
    pool: SqlitePool,
}

impl SizeRepository {
    /// Creates a new SizeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SizeRepository { pool }
    }

    /// Lists every size, active or not, in display order.
    pub async fn list_all(&self) -> DbResult<Vec<Size>> {
        let sql = format!("{} ORDER BY display_order, id", SELECT_SIZES);
        let rows = sqlx::query_as::<_, SizeRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed sizes");
        rows.into_iter().map(to_size).collect()
    }

    /// Lists active rows as stored, for the catalog loader to validate.
    pub async fn list_active_records(&self) -> DbResult<Vec<SizeRecord>> {
        let sql = format!("{} WHERE is_active = 1 ORDER BY display_order, id", SELECT_SIZES);
        let rows = sqlx::query_as::<_, SizeRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Gets a size by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Size>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SIZES);
        let row = sqlx::query_as::<_, SizeRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(to_size).transpose()
    }

    /// Inserts a new size.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, size: &Size) -> DbResult<Size> {
        debug!(id = %size.id, name = %size.name, "Inserting size");

        let row = SizeRecord::from(size);
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO sizes (
                id, name, price_cents, display_order, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(row.price_cents)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(size.clone())
    }

    /// Updates an existing size.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Size doesn't exist
    pub async fn update(&self, size: &Size) -> DbResult<()> {
        debug!(id = %size.id, "Updating size");

        let row = SizeRecord::from(size);

        let result = sqlx::query(
            r#"
            UPDATE sizes SET
                name = ?2,
                price_cents = ?3,
                display_order = ?4,
                is_active = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(row.price_cents)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Size", &size.id));
        }

        Ok(())
    }

    /// Deletes a size permanently.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        delete_row(&self.pool, Table::Sizes, id).await
    }

    /// Flips the active flag, returning the new value.
    pub async fn toggle_active(&self, id: &str) -> DbResult<bool> {
        toggle_active(&self.pool, Table::Sizes, id).await
    }

    /// Shows or hides a size on the storefront.
    pub async fn set_active(&self, id: &str, is_active: bool) -> DbResult<()> {
        set_active(&self.pool, Table::Sizes, id, is_active).await
    }

    /// Counts all sizes.
    pub async fn count(&self) -> DbResult<i64> {
        count_rows(&self.pool, Table::Sizes).await
    }

    /// Display order for a size created now.
    pub async fn next_display_order(&self) -> DbResult<i32> {
        next_display_order(&self.pool, Table::Sizes).await
    }
}

fn to_size(row: SizeRecord) -> DbResult<Size> {
    let id = row.id.clone();
    Size::try_from(row).map_err(|e| DbError::invalid_row("size", id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use acai_core::Money;

    async fn repo() -> SizeRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().sizes()
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let repo = repo().await;

        let size = Size::new("s1", "300ml", Money::from_cents(1200), 0);
        repo.insert(&size).await.unwrap();
        assert_eq!(repo.get_by_id("s1").await.unwrap(), Some(size.clone()));

        let mut bigger = size.clone();
        bigger.name = "350ml".to_string();
        bigger.price = Money::from_cents(1350);
        repo.update(&bigger).await.unwrap();
        assert_eq!(repo.get_by_id("s1").await.unwrap(), Some(bigger));

        repo.delete("s1").await.unwrap();
        assert_eq!(repo.get_by_id("s1").await.unwrap(), None);
        assert!(matches!(repo.delete("s1").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_all_in_display_order() {
        let repo = repo().await;
        repo.insert(&Size::new("s3", "700ml", Money::from_cents(2400), 2)).await.unwrap();
        repo.insert(&Size::new("s1", "300ml", Money::from_cents(1200), 0)).await.unwrap();
        repo.insert(&Size::new("s2", "500ml", Money::from_cents(1800), 1)).await.unwrap();

        let names: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["300ml", "500ml", "700ml"]);
        assert_eq!(repo.next_display_order().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_toggle_hides_from_active_records() {
        let repo = repo().await;
        repo.insert(&Size::new("s1", "300ml", Money::from_cents(1200), 0)).await.unwrap();
        repo.insert(&Size::new("s2", "500ml", Money::from_cents(1800), 1)).await.unwrap();

        assert!(!repo.toggle_active("s1").await.unwrap());
        let active = repo.list_active_records().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "s2");

        assert!(repo.toggle_active("s1").await.unwrap());
        repo.set_active("s2", false).await.unwrap();
        let active = repo.list_active_records().await.unwrap();
        assert_eq!(active[0].id, "s1");

        assert!(matches!(repo.toggle_active("nope").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = repo().await;
        let size = Size::new("s1", "300ml", Money::from_cents(1200), 0);
        repo.insert(&size).await.unwrap();
        assert!(matches!(repo.insert(&size).await, Err(DbError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_schema() {
        let repo = repo().await;
        let size = Size::new("s1", "300ml", Money::from_cents(-1), 0);
        assert!(matches!(repo.insert(&size).await, Err(DbError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_price_above_limit_rejected_by_schema() {
        let repo = repo().await;
        let size = Size::new("s1", "Balde", Money::from_cents(acai_core::MAX_PRICE_CENTS + 1), 0);
        assert!(matches!(repo.insert(&size).await, Err(DbError::ConstraintViolation(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_size() {
        let repo = repo().await;
        let size = Size::new("ghost", "300ml", Money::from_cents(1200), 0);
        assert!(matches!(repo.update(&size).await, Err(DbError::NotFound { .. })));
    }
}
