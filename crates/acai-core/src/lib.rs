//! # acai-core: Pure Order Logic for the Açaí Storefront
//!
//! This crate turns a product, a size and a set of toppings into a priced
//! order and the text that is handed to WhatsApp. Everything here is a pure
//! function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Açaí Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / Admin (apps/storefront)            │   │
//! │  │    Menu ──► Order Session ──► Price ──► wa.me link             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ acai-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │   │ catalog │ │selection│ │   order   │ │dispatch │ │ money │ │   │
//! │  │   │ Loader  │ │  State  │ │  Pricer   │ │ wa.me   │ │ BRL   │ │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ CatalogStore trait                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 acai-db (SQLite catalog store)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Size, Topping, Product, Combo)
//! - [`money`] - Money type with integer centavos and BRL formatting
//! - [`catalog`] - Catalog snapshot loader and load states
//! - [`record`] - Raw store rows and their typed conversions
//! - [`selection`] - Selection state machine
//! - [`order`] - Order pricer and summary
//! - [`dispatch`] - WhatsApp deep link building
//! - [`validation`] - Input validation for admin writes
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use acai_core::{compute_order, Money, Product, Selection, Size, Topping};
//!
//! let sizes = vec![Size::new("s1", "500ml", Money::from_cents(1800), 0)];
//! let toppings = vec![Topping::new("t1", "Granola", Money::from_cents(200), 0)];
//! let product = Product::new("p1", "Açaí Tradicional", Money::from_cents(1200));
//!
//! let mut selection = Selection::new();
//! selection.on_catalog_loaded(&sizes).unwrap();
//! selection.on_toppings_loaded(&toppings);
//! selection.toggle_topping("t1").unwrap();
//!
//! let order = compute_order(&product, &sizes, &toppings, &selection).unwrap();
//! assert_eq!(order.total_price.cents(), 2000);
//! assert!(order.summary().contains("Total: R$ 20,00"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod money;
pub mod order;
pub mod record;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogLoader, CatalogStore, DisplayOrdered, LoadState, StoreError};
pub use dispatch::WhatsAppChannel;
pub use error::{CoreError, CoreResult, SelectionKind, ValidationError};
pub use money::Money;
pub use order::{compute_order, PricedOrder, PricedTopping};
pub use record::{ComboRecord, ProductRecord, SizeRecord, ToppingRecord};
pub use selection::{Selection, SelectionState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Greeting that opens every WhatsApp message unless configured otherwise.
pub const DEFAULT_GREETING: &str = "Olá, gostaria de fazer um pedido!";

/// Maximum length of any catalog name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of descriptions, badges and categories.
pub const MAX_TEXT_LEN: usize = 500;

/// Largest price any catalog row may carry (R$ 1.000.000,00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
