//! # Topping Repository
//!
//! Database operations for the `toppings` table. Toppings carry an optional
//! category ("Frutas", "Cremes", ...) that the admin screen groups by.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use acai_core::{Topping, ToppingRecord};

use super::{count_rows, delete_row, next_display_order, set_active, toggle_active, Table};
use crate::error::{DbError, DbResult};

const SELECT_TOPPINGS: &str =
    "SELECT id, name, price_cents, category, display_order, is_active FROM toppings";

/// Repository for topping database operations.
#[derive(Debug, Clone)]
pub struct ToppingRepository {
    pool: SqlitePool,
}

impl ToppingRepository {
    /// Creates a new ToppingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ToppingRepository { pool }
    }

    /// Lists every topping, active or not, in display order.
    pub async fn list_all(&self) -> DbResult<Vec<Topping>> {
        let sql = format!("{} ORDER BY display_order, id", SELECT_TOPPINGS);
        let rows = sqlx::query_as::<_, ToppingRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed toppings");
        rows.into_iter().map(to_topping).collect()
    }

    /// Lists active rows as stored, for the catalog loader to validate.
    pub async fn list_active_records(&self) -> DbResult<Vec<ToppingRecord>> {
        let sql = format!("{} WHERE is_active = 1 ORDER BY display_order, id", SELECT_TOPPINGS);
        let rows = sqlx::query_as::<_, ToppingRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Gets a topping by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Topping>> {
        let sql = format!("{} WHERE id = ?1", SELECT_TOPPINGS);
        let row = sqlx::query_as::<_, ToppingRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(to_topping).transpose()
    }

    /// Inserts a new topping.
    pub async fn insert(&self, topping: &Topping) -> DbResult<Topping> {
        debug!(id = %topping.id, name = %topping.name, "Inserting topping");

        let row = ToppingRecord::from(topping);

        sqlx::query(
            r#"
            INSERT INTO toppings (
                id, name, price_cents, category, display_order, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(row.price_cents)
        .bind(&row.category)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(topping.clone())
    }

    /// Updates an existing topping.
    pub async fn update(&self, topping: &Topping) -> DbResult<()> {
        debug!(id = %topping.id, "Updating topping");

        let row = ToppingRecord::from(topping);

        let result = sqlx::query(
            r#"
            UPDATE toppings SET
                name = ?2,
                price_cents = ?3,
                category = ?4,
                display_order = ?5,
                is_active = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(row.price_cents)
        .bind(&row.category)
        .bind(row.display_order)
        .bind(row.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Topping", &topping.id));
        }

        Ok(())
    }

    /// Deletes a topping permanently.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        delete_row(&self.pool, Table::Toppings, id).await
    }

    /// Flips the active flag, returning the new value.
    pub async fn toggle_active(&self, id: &str) -> DbResult<bool> {
        toggle_active(&self.pool, Table::Toppings, id).await
    }

    /// Shows or hides a topping on the storefront.
    pub async fn set_active(&self, id: &str, is_active: bool) -> DbResult<()> {
        set_active(&self.pool, Table::Toppings, id, is_active).await
    }

    /// Counts all toppings.
    pub async fn count(&self) -> DbResult<i64> {
        count_rows(&self.pool, Table::Toppings).await
    }

    /// Display order for a topping created now.
    pub async fn next_display_order(&self) -> DbResult<i32> {
        next_display_order(&self.pool, Table::Toppings).await
    }
}

fn to_topping(row: ToppingRecord) -> DbResult<Topping> {
    let id = row.id.clone();
    Topping::try_from(row).map_err(|e| DbError::invalid_row("topping", id, e))
}
