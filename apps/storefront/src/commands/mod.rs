//! # Commands Module
//!
//! Everything the storefront and admin screens can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── menu.rs     ◄─── Menu listing, combo links, dashboard stats
//! ├── order.rs    ◄─── Order session: load, choose, price, hand off
//! └── admin.rs    ◄─── Catalog CRUD for sizes, toppings, products, combos
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller (CLI / UI)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  async fn command(store or db, config, args) -> Result<T, ApiError>    │
//! │       │                                                                 │
//! │       ├── reads   ──► CatalogLoader<S: CatalogStore>                   │
//! │       ├── writes  ──► Database repositories                            │
//! │       └── pricing ──► acai-core (pure)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  T: Serialize (camelCase JSON)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-side commands are generic over the store so tests can run them
//! against in-memory fakes.

pub mod admin;
pub mod menu;
pub mod order;
