//! # Catalog Snapshot Loader
//!
//! Loads the active sizes, toppings, combos and products from a [`CatalogStore`] and
//! returns them as strongly typed, deterministically ordered snapshots.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Snapshot Load                             │
//! │                                                                         │
//! │  CatalogLoader::load_sizes()                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.fetch_sizes().await ──── Err ──► CoreError::LoadFailure         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<SizeRecord>                                                       │
//! │       │  is_active = false?  → dropped                                 │
//! │       │  malformed row?      → dropped + warn!                         │
//! │       ▼                                                                 │
//! │  sort by (display_order, id)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Size> ──► LoadState::Loaded(..) in the session                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::record::{ComboRecord, ProductRecord, SizeRecord, ToppingRecord};
use crate::types::{Combo, Product, Size, Topping};

// =============================================================================
// Catalog Store
// =============================================================================

/// Opaque failure reported by a catalog store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError(message.into())
    }
}

/// Read access to the catalog tables.
///
/// Implementations should return active rows ordered by `display_order`,
/// but the loader filters and sorts again, so a store that returns every
/// row in arbitrary order still yields a correct snapshot.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists active size rows.
    async fn fetch_sizes(&self) -> Result<Vec<SizeRecord>, StoreError>;

    /// Lists active topping rows.
    async fn fetch_toppings(&self) -> Result<Vec<ToppingRecord>, StoreError>;

    /// Lists active combo rows.
    async fn fetch_combos(&self) -> Result<Vec<ComboRecord>, StoreError>;

    /// Lists active product rows.
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, StoreError>;
}

// =============================================================================
// Display Ordering
// =============================================================================

/// Entities that the storefront lists in a caller-defined order.
pub trait DisplayOrdered {
    fn id(&self) -> &str;
    fn display_order(&self) -> i32;
    fn is_active(&self) -> bool;
}

macro_rules! impl_display_ordered {
    ($($ty:ty),*) => {
        $(
            impl DisplayOrdered for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn display_order(&self) -> i32 {
                    self.display_order
                }

                fn is_active(&self) -> bool {
                    self.is_active
                }
            }
        )*
    };
}

impl_display_ordered!(Size, Topping, Product, Combo);

/// Sorts by `display_order`, breaking ties by id.
pub fn sort_for_display<T: DisplayOrdered>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.display_order()
            .cmp(&b.display_order())
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// Keeps only active entities, in display order.
pub fn active_in_display_order<T: DisplayOrdered>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut active: Vec<T> = items.into_iter().filter(|item| item.is_active()).collect();
    sort_for_display(&mut active);
    active
}

// =============================================================================
// Load State
// =============================================================================

/// Where a catalog list is in its load lifecycle.
///
/// Lets callers tell "still loading", "loaded but empty" and "failed"
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// Builds a state from a loader result.
    pub fn from_result(result: CoreResult<Vec<T>>) -> Self {
        match result {
            Ok(items) => LoadState::Loaded(items),
            Err(CoreError::LoadFailure(message)) => LoadState::Failed(message),
            Err(other) => LoadState::Failed(other.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// True when the load succeeded and returned nothing.
    pub fn is_empty_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(items) if items.is_empty())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// The loaded items, if the load succeeded.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            LoadState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    /// The failure cause, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Loads catalog snapshots from a [`CatalogStore`].
///
/// ## Usage
/// ```rust,ignore
/// let loader = CatalogLoader::new(db.clone());
/// let (sizes, toppings) = tokio::join!(loader.load_sizes(), loader.load_toppings());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader<S> {
    store: S,
}

impl<S: CatalogStore> CatalogLoader<S> {
    pub fn new(store: S) -> Self {
        CatalogLoader { store }
    }

    /// Returns the wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads active sizes in display order.
    pub async fn load_sizes(&self) -> CoreResult<Vec<Size>> {
        let rows = self.store.fetch_sizes().await.map_err(load_failure)?;
        let sizes = snapshot("size", rows);
        debug!(count = sizes.len(), "Loaded active sizes");
        Ok(sizes)
    }

    /// Loads active toppings in display order.
    pub async fn load_toppings(&self) -> CoreResult<Vec<Topping>> {
        let rows = self.store.fetch_toppings().await.map_err(load_failure)?;
        let toppings = snapshot("topping", rows);
        debug!(count = toppings.len(), "Loaded active toppings");
        Ok(toppings)
    }

    /// Loads active combos in display order.
    pub async fn load_combos(&self) -> CoreResult<Vec<Combo>> {
        let rows = self.store.fetch_combos().await.map_err(load_failure)?;
        let combos = snapshot("combo", rows);
        debug!(count = combos.len(), "Loaded active combos");
        Ok(combos)
    }

    /// Loads active products in display order.
    pub async fn load_products(&self) -> CoreResult<Vec<Product>> {
        let rows = self.store.fetch_products().await.map_err(load_failure)?;
        let products = snapshot("product", rows);
        debug!(count = products.len(), "Loaded active products");
        Ok(products)
    }
}

fn load_failure(err: StoreError) -> CoreError {
    CoreError::LoadFailure(err.0)
}

/// Maps rows to typed entities, dropping malformed and inactive ones.
fn snapshot<R, T>(entity: &str, rows: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = ValidationError> + DisplayOrdered,
{
    let typed = rows.into_iter().filter_map(|row| match T::try_from(row) {
        Ok(item) => Some(item),
        Err(err) => {
            warn!(entity, error = %err, "Rejected malformed catalog row");
            None
        }
    });

    active_in_display_order(typed)
}

// =============================================================================
// Unit Tests
// =============================================================================
