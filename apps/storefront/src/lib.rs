//! # Açaí Storefront Library
//!
//! Application layer of the açaí shop: configuration, order sessions, the
//! WhatsApp hand-off and the catalog admin commands.
//!
//! ## Module Organization
//! ```text
//! acai_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── config.rs       ◄─── ShopConfig from environment
//! ├── error.rs        ◄─── API error type for commands
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── OrderSession (load states + selection)
//! └── commands/
//!     ├── mod.rs      ◄─── Command exports
//!     ├── menu.rs     ◄─── Menu listing, combo cards, stats
//!     ├── order.rs    ◄─── Open session, price, WhatsApp link
//!     └── admin.rs    ◄─── Catalog CRUD
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or "info,acai=debug,sqlx=warn"    │
//! │  2. ShopConfig::load()      environment + platform data dir            │
//! │  3. Database::new(..)       SQLite, WAL, migrations                    │
//! │  4. CatalogLoader::new(db)  read side for menu and order sessions      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, ShopConfig};
pub use error::{ApiError, ErrorCode};
pub use state::OrderSession;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=acai=trace` - Show trace for acai crates only
/// - Default: INFO, DEBUG for acai crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,acai=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
