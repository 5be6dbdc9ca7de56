//! # Repository Module
//!
//! Database repository implementations for the catalog tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin command / CatalogStore                                          │
//! │       │                                                                 │
//! │       │  db.sizes().list_all()                                         │
//! │       ▼                                                                 │
//! │  SizeRepository / ToppingRepository / ProductRepository / ComboRepo    │
//! │  ├── list_all()          every row, display order                      │
//! │  ├── list_active_records()  raw active rows for the loader             │
//! │  ├── get_by_id(id)                                                     │
//! │  ├── insert(entity) / update(entity)                                   │
//! │  ├── delete(id)                                                        │
//! │  ├── toggle_active(id) / set_active(id, bool)                          │
//! │  └── count() / next_display_order()                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The four tables share the same `id`, `display_order`, `is_active` and
//! timestamp columns, so the statements that only touch those live here.
//!
//! ## Available Repositories
//!
//! - [`SizeRepository`](size::SizeRepository)
//! - [`ToppingRepository`](topping::ToppingRepository)
//! - [`ProductRepository`](product::ProductRepository)
//! - [`ComboRepository`](combo::ComboRepository)

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

pub mod combo;
pub mod product;
pub mod size;
pub mod topping;

/// Catalog table names. Only these are ever interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Sizes,
    Toppings,
    Products,
    Combos,
}

impl Table {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Table::Sizes => "sizes",
            Table::Toppings => "toppings",
            Table::Products => "products",
            Table::Combos => "combos",
        }
    }

    /// Entity label used in errors and logs.
    pub(crate) fn entity(self) -> &'static str {
        match self {
            Table::Sizes => "Size",
            Table::Toppings => "Topping",
            Table::Products => "Product",
            Table::Combos => "Combo",
        }
    }
}

/// Helper to generate a new catalog row ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hard-deletes a row.
pub(crate) async fn delete_row(pool: &SqlitePool, table: Table, id: &str) -> DbResult<()> {
    debug!(table = table.name(), id = %id, "Deleting row");

    let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(table.entity(), id));
    }

    Ok(())
}

/// Flips `is_active` and returns the new value.
pub(crate) async fn toggle_active(pool: &SqlitePool, table: Table, id: &str) -> DbResult<bool> {
    let sql = format!(
        "UPDATE {} SET is_active = NOT is_active, updated_at = ?2 WHERE id = ?1 RETURNING is_active",
        table.name()
    );

    let is_active: Option<bool> = sqlx::query_scalar(&sql)
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;

    let is_active = is_active.ok_or_else(|| DbError::not_found(table.entity(), id))?;
    debug!(table = table.name(), id = %id, is_active, "Toggled active flag");
    Ok(is_active)
}

/// Sets `is_active` to a fixed value.
pub(crate) async fn set_active(
    pool: &SqlitePool,
    table: Table,
    id: &str,
    is_active: bool,
) -> DbResult<()> {
    debug!(table = table.name(), id = %id, is_active, "Setting active flag");

    let sql = format!(
        "UPDATE {} SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
        table.name()
    );
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(is_active)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(table.entity(), id));
    }

    Ok(())
}

/// Counts every row, active or not.
pub(crate) async fn count_rows(pool: &SqlitePool, table: Table) -> DbResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(count)
}

/// Default `display_order` for a new row: the current row count.
pub(crate) async fn next_display_order(pool: &SqlitePool, table: Table) -> DbResult<i32> {
    let count = count_rows(pool, table).await?;
    i32::try_from(count).map_err(|_| DbError::Internal(format!("{} row count overflow", table.name())))
}
