//! # Combo Repository
//!
//! Database operations for the `combos` table.
//!
//! A combo has a sale price and an optional struck-through original price.
//! The icon is stored as text ("Star" / "Flame"); unknown values read back
//! as the star.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use acai_core::{Combo, ComboRecord};

use super::{count_rows, delete_row, next_display_order, set_active, toggle_active, Table};
use crate::error::{DbError, DbResult};

const SELECT_COMBOS: &str = "SELECT id, name, description, original_price_cents, price_cents, badge, icon, display_order, is_active FROM combos";

/// Repository for combo database operations.
#[derive(Debug, Clone)]
pub struct ComboRepository {
    pool: SqlitePool,
}

impl ComboRepository {
    /// Creates a new ComboRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ComboRepository { pool }
    }

    /// Lists every combo, active or not, in display order.
    pub async fn list_all(&self) -> DbResult<Vec<Combo>> {
        let sql = format!("{} ORDER BY display_order, id", SELECT_COMBOS);
        let rows = sqlx::query_as::<_, ComboRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed combos");
        rows.into_iter().map(to_combo).collect()
    }

    /// Lists active rows as stored, for the catalog loader to validate.
    pub async fn list_active_records(&self) -> DbResult<Vec<ComboRecord>> {
        let sql = format!("{} WHERE is_active = 1 ORDER BY display_order, id", SELECT_COMBOS);
        let rows = sqlx::query_as::<_, ComboRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Gets a combo by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Combo>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COMBOS);
        let row = sqlx::query_as::<_, ComboRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(to_combo).transpose()
    }

    /// Inserts a new combo.
    pub async fn insert(&self, combo: &Combo) -> DbResult<Combo> {
        debug!(id = %combo.id, name = %combo.name, "Inserting combo");

        let row = ComboRecord::from(combo);

        sqlx::query(
            r#"
            INSERT INTO combos (
                id, name, description, original_price_cents, price_cents,
                badge, icon, display_order, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.original_price_cents)
        .bind(row.price_cents)
        .bind(&row.badge)
        .bind(&row.icon)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(combo.clone())
    }

    /// Updates an existing combo.
    pub async fn update(&self, combo: &Combo) -> DbResult<()> {
        debug!(id = %combo.id, "Updating combo");

        let row = ComboRecord::from(combo);

        let result = sqlx::query(
            r#"
            UPDATE combos SET
                name = ?2,
                description = ?3,
                original_price_cents = ?4,
                price_cents = ?5,
                badge = ?6,
                icon = ?7,
                display_order = ?8,
                is_active = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.original_price_cents)
        .bind(row.price_cents)
        .bind(&row.badge)
        .bind(&row.icon)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Combo", &combo.id));
        }

        Ok(())
    }

    /// Deletes a combo permanently.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        delete_row(&self.pool, Table::Combos, id).await
    }

    /// Flips the active flag, returning the new value.
    pub async fn toggle_active(&self, id: &str) -> DbResult<bool> {
        toggle_active(&self.pool, Table::Combos, id).await
    }

    /// Shows or hides a combo on the storefront.
    pub async fn set_active(&self, id: &str, is_active: bool) -> DbResult<()> {
        set_active(&self.pool, Table::Combos, id, is_active).await
    }

    /// Counts all combos.
    pub async fn count(&self) -> DbResult<i64> {
        count_rows(&self.pool, Table::Combos).await
    }

    /// Display order for a combo created now.
    pub async fn next_display_order(&self) -> DbResult<i32> {
        next_display_order(&self.pool, Table::Combos).await
    }
}

fn to_combo(row: ComboRecord) -> DbResult<Combo> {
    let id = row.id.clone();
    Combo::try_from(row).map_err(|e| DbError::invalid_row("combo", id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use acai_core::{ComboIcon, Money};

    async fn repo() -> ComboRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().combos()
    }

    fn casal() -> Combo {
        let mut combo = Combo::new("c1", "Combo Casal", Money::from_cents(3490));
        combo.original_price = Some(Money::from_cents(4200));
        combo.badge = Some("Promoção".to_string());
        combo.icon = ComboIcon::Flame;
        combo
    }

    #[tokio::test]
    async fn test_combo_round_trip() {
        let repo = repo().await;
        repo.insert(&casal()).await.unwrap();

        let stored = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored, casal());
        assert_eq!(stored.savings(), Some(Money::from_cents(710)));
    }

    #[tokio::test]
    async fn test_unknown_icon_reads_as_star() {
        let repo = repo().await;
        repo.insert(&casal()).await.unwrap();

        sqlx::query("UPDATE combos SET icon = 'Rocket' WHERE id = 'c1'")
            .execute(&repo.pool)
            .await
            .unwrap();

        let stored = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.icon, ComboIcon::Star);
    }

    #[tokio::test]
    async fn test_clearing_original_price() {
        let repo = repo().await;
        repo.insert(&casal()).await.unwrap();

        let mut plain = casal();
        plain.original_price = None;
        repo.update(&plain).await.unwrap();

        let stored = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.original_price, None);
        assert_eq!(stored.savings(), None);
    }

    #[tokio::test]
    async fn test_malformed_row_is_reported() {
        let repo = repo().await;
        repo.insert(&casal()).await.unwrap();

        sqlx::query("UPDATE combos SET name = '   ' WHERE id = 'c1'")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(repo.list_all().await, Err(DbError::InvalidRow { .. })));
    }
}
