//! # Order Pricer & Summarizer
//!
//! Turns a product and a [`Selection`] into a [`PricedOrder`] and the text
//! summary that goes into the WhatsApp message.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_order(product, sizes, toppings, selection)                    │
//! │       │                                                                 │
//! │       ├── chosen size not in `sizes`? ──────► MissingSize              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = size.price                          500ml  → 1800             │
//! │       │                                                                 │
//! │       ├── topping id not in `toppings`? ────► InvalidSelection         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total += topping.price (insertion order)    Granola → +200            │
//! │                                              Nutella → +500            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricedOrder { total_price: 2500 }  ──► summary() "Total: R$ 25,00"    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unknown Toppings
//! A chosen topping id that is missing from `toppings` fails the whole
//! computation. The total is never computed against a partial selection.

use serde::Serialize;
use std::fmt::Write;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::selection::Selection;
use crate::types::{Product, Size, Topping};

/// A chosen topping with its surcharge, frozen at pricing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedTopping {
    pub name: String,
    pub price: Money,
}

/// The derived price and contents of one configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrder {
    pub product_name: String,
    pub size_name: String,
    pub size_unit_price: Money,
    /// In the order the toppings were chosen.
    pub toppings: Vec<PricedTopping>,
    /// `size_unit_price` plus every topping price.
    pub total_price: Money,
}

impl PricedOrder {
    /// Sum of all topping surcharges.
    pub fn toppings_total(&self) -> Money {
        self.toppings.iter().map(|t| t.price).sum()
    }

    /// Renders the order as message text.
    ///
    /// ## Format
    /// ```text
    /// *Açaí Tradicional*
    /// Tamanho: 500ml (R$ 18,00)
    /// Adicionais:
    /// - Granola (+ R$ 2,00)
    /// - Nutella (+ R$ 5,00)
    /// Total: R$ 25,00
    /// ```
    ///
    /// With no toppings the list is replaced by `Adicionais: nenhum`.
    /// Identical orders always render identical text.
    pub fn summary(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "*{}*", self.product_name);
        let _ = writeln!(out, "Tamanho: {} ({})", self.size_name, self.size_unit_price);

        if self.toppings.is_empty() {
            out.push_str("Adicionais: nenhum\n");
        } else {
            out.push_str("Adicionais:\n");
            for topping in &self.toppings {
                let _ = writeln!(out, "- {} ({})", topping.name, topping.price.surcharge());
            }
        }

        let _ = write!(out, "Total: {}", self.total_price);
        out
    }
}

/// Prices the current selection.
///
/// ## Errors
/// - [`CoreError::MissingSize`]: no size chosen, or the chosen size is not
///   in `sizes`
/// - [`CoreError::InvalidSelection`]: a chosen topping is not in `toppings`
/// - [`CoreError::Validation`]: the total does not fit in centavos
///
/// ## Example
/// ```rust
/// use acai_core::{compute_order, CoreError, Money, Product, Selection};
///
/// let product = Product::new("p1", "Açaí Zero", Money::from_cents(1400));
/// let selection = Selection::new();
///
/// let err = compute_order(&product, &[], &[], &selection).unwrap_err();
/// assert_eq!(err, CoreError::MissingSize);
/// ```
pub fn compute_order(
    product: &Product,
    sizes: &[Size],
    toppings: &[Topping],
    selection: &Selection,
) -> CoreResult<PricedOrder> {
    let size = selection
        .chosen_size_id()
        .and_then(|id| sizes.iter().find(|s| s.id == id))
        .ok_or(CoreError::MissingSize)?;

    let mut total = size.price;
    let mut priced = Vec::with_capacity(selection.chosen_topping_ids().len());

    for id in selection.chosen_topping_ids().iter() {
        let topping = toppings
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::invalid_topping(id))?;

        total = total.checked_add(topping.price).ok_or_else(total_overflow)?;
        priced.push(PricedTopping {
            name: topping.name.clone(),
            price: topping.price,
        });
    }

    Ok(PricedOrder {
        product_name: product.name.clone(),
        size_name: size.name.clone(),
        size_unit_price: size.price,
        toppings: priced,
        total_price: total,
    })
}

fn total_overflow() -> CoreError {
    CoreError::Validation(ValidationError::OutOfRange {
        field: "total".to_string(),
        min: 0,
        max: i64::MAX,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
