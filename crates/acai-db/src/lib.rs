//! # acai-db: Catalog Store for the Açaí Storefront
//!
//! This crate provides database access for the storefront catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Açaí Storefront Data Flow                          │
//! │                                                                         │
//! │  CatalogLoader (acai-core)          Admin commands (storefront)        │
//! │       │ CatalogStore trait               │ repositories                 │
//! │       ▼                                  ▼                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     acai-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ SizeRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ToppingRepo   │    │ 001_catalog  │  │   │
//! │  │   │ CatalogStore  │    │ ProductRepo   │    │ _schema.sql  │  │   │
//! │  │   │               │    │ ComboRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (acai.db)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (size, topping, product, combo)
//! - [`catalog`] - `CatalogStore` implementation for [`Database`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acai_core::CatalogLoader;
//! use acai_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("acai.db")).await?;
//!
//! // Storefront reads go through the loader
//! let sizes = CatalogLoader::new(db.clone()).load_sizes().await?;
//!
//! // Admin writes go straight to the repositories
//! db.sizes().toggle_active(&sizes[0].id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::combo::ComboRepository;
pub use repository::generate_id;
pub use repository::product::ProductRepository;
pub use repository::size::SizeRepository;
pub use repository::topping::ToppingRepository;
