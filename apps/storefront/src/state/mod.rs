//! # State Module
//!
//! Per-session state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │        OrderSession          │   │        ShopConfig            │   │
//! │  │                              │   │      (crate::config)         │   │
//! │  │  product                     │   │  whatsapp channel            │   │
//! │  │  LoadState<Size>             │   │  greeting                    │   │
//! │  │  LoadState<Topping>          │   │  db path                     │   │
//! │  │  Selection                   │   │                              │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • OrderSession: owned by whoever opened it, mutated through &mut     │
//! │  • ShopConfig: read-only after startup                                 │
//! │  • Database: internal connection pool (thread-safe)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::OrderSession;
