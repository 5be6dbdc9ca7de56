//! # Catalog Types
//!
//! Core catalog types shared by the storefront, the admin screens and the
//! order engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Size       │   │     Topping     │   │     Product     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name  "500ml"  │   │  name "Granola" │   │  name           │       │
//! │  │  price (base)   │   │  price (+extra) │   │  base_price     │       │
//! │  │  display_order  │   │  category       │   │  (display only) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Combo      │   │    ComboIcon    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  price          │   │  Star           │                             │
//! │  │  original_price │   │  Flame          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The authoritative order price is always size + toppings. A product's
//! `base_price` is the "A partir de" value on the menu card.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Size
// =============================================================================

/// A purchasable container volume tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// Opaque identifier, stable across reloads.
    pub id: String,

    /// Display label, e.g. "500ml".
    pub name: String,

    /// Base unit price for this tier.
    pub price: Money,

    /// Presentation order; not unique.
    pub display_order: i32,

    /// Inactive sizes are never offered for new selection.
    pub is_active: bool,
}

impl Size {
    /// Creates an active size.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        display_order: i32,
    ) -> Self {
        Size {
            id: id.into(),
            name: name.into(),
            price,
            display_order,
            is_active: true,
        }
    }
}

// =============================================================================
// Topping
// =============================================================================

/// An optional add-on ("adicional") with an additive surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Topping {
    pub id: String,
    pub name: String,
    /// Surcharge added to the size price.
    pub price: Money,
    /// Free-text grouping, e.g. "Frutas".
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl Topping {
    /// Creates an active, uncategorized topping.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        display_order: i32,
    ) -> Self {
        Topping {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
            display_order,
            is_active: true,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A menu item being configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// "A partir de" price shown on the menu card. Never used for pricing.
    pub base_price: Money,
    /// Card ribbon, e.g. "Mais Pedido".
    pub badge: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl Product {
    /// Creates an active product with no description or badge.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            description: None,
            base_price,
            badge: None,
            display_order: 0,
            is_active: true,
        }
    }
}

// =============================================================================
// Combo
// =============================================================================

/// Icon shown on a combo badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ComboIcon {
    #[default]
    Star,
    Flame,
}

impl fmt::Display for ComboIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboIcon::Star => f.write_str("Star"),
            ComboIcon::Flame => f.write_str("Flame"),
        }
    }
}

impl FromStr for ComboIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Star" | "star" => Ok(ComboIcon::Star),
            "Flame" | "flame" => Ok(ComboIcon::Flame),
            other => Err(format!("unknown combo icon '{}'", other)),
        }
    }
}

/// A bundled promotional offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Struck-through "de" price.
    pub original_price: Option<Money>,
    pub price: Money,
    pub badge: Option<String>,
    pub icon: ComboIcon,
    pub display_order: i32,
    pub is_active: bool,
}

impl Combo {
    /// Creates an active combo with no original price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Combo {
            id: id.into(),
            name: name.into(),
            description: None,
            original_price: None,
            price,
            badge: None,
            icon: ComboIcon::default(),
            display_order: 0,
            is_active: true,
        }
    }

    /// Amount saved against the original price, when there is a discount.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub products: i64,
    pub sizes: i64,
    pub toppings: i64,
    pub combos: i64,
}
