//! # Store Records
//!
//! Loosely typed rows as the catalog store hands them over, and their
//! conversion into the strongly typed catalog types.
//!
//! ## Boundary Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SQLite row / backend JSON                                             │
//! │  { price_cents: i64, display_order: i64, name: String, ... }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Size::try_from(SizeRecord) ← THIS MODULE                              │
//! │       │                                                                 │
//! │       ├── negative price?        → ValidationError::OutOfRange         │
//! │       ├── blank name?            → ValidationError::Required           │
//! │       ├── display_order ∉ i32?   → ValidationError::OutOfRange         │
//! │       │                                                                 │
//! │       └── OK → Size { price: Money, display_order: i32, ... }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `sqlx` feature the records derive `sqlx::FromRow` so acai-db can
//! query straight into them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Combo, ComboIcon, Product, Size, Topping};
use crate::validation::{normalize_optional, validate_name, validate_price_cents};

/// A raw `sizes` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SizeRecord {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub display_order: i64,
    pub is_active: bool,
}

/// A raw `toppings` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ToppingRecord {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub category: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

/// A raw `products` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub badge: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

/// A raw `combos` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ComboRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub original_price_cents: Option<i64>,
    pub price_cents: i64,
    pub badge: Option<String>,
    pub icon: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

fn display_order(value: i64) -> Result<i32, ValidationError> {
    i32::try_from(value)
        .ok()
        .filter(|order| *order >= 0)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "display_order".to_string(),
            min: 0,
            max: i32::MAX as i64,
        })
}

fn price(cents: i64) -> Result<Money, ValidationError> {
    validate_price_cents(cents)?;
    Ok(Money::from_cents(cents))
}

impl TryFrom<SizeRecord> for Size {
    type Error = ValidationError;

    fn try_from(row: SizeRecord) -> Result<Self, Self::Error> {
        validate_name(&row.name)?;
        Ok(Size {
            price: price(row.price_cents)?,
            display_order: display_order(row.display_order)?,
            name: row.name.trim().to_string(),
            id: row.id,
            is_active: row.is_active,
        })
    }
}

impl TryFrom<ToppingRecord> for Topping {
    type Error = ValidationError;

    fn try_from(row: ToppingRecord) -> Result<Self, Self::Error> {
        validate_name(&row.name)?;
        Ok(Topping {
            price: price(row.price_cents)?,
            display_order: display_order(row.display_order)?,
            name: row.name.trim().to_string(),
            category: normalize_optional(row.category),
            id: row.id,
            is_active: row.is_active,
        })
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(row: ProductRecord) -> Result<Self, Self::Error> {
        validate_name(&row.name)?;
        Ok(Product {
            base_price: price(row.base_price_cents)?,
            display_order: display_order(row.display_order)?,
            name: row.name.trim().to_string(),
            description: normalize_optional(row.description),
            badge: normalize_optional(row.badge),
            id: row.id,
            is_active: row.is_active,
        })
    }
}

impl TryFrom<ComboRecord> for Combo {
    type Error = ValidationError;

    fn try_from(row: ComboRecord) -> Result<Self, Self::Error> {
        validate_name(&row.name)?;
        let original_price = row.original_price_cents.map(price).transpose()?;
        // Unknown or missing icons fall back to the star badge
        let icon = row
            .icon
            .as_deref()
            .and_then(|icon| icon.parse::<ComboIcon>().ok())
            .unwrap_or_default();

        Ok(Combo {
            price: price(row.price_cents)?,
            original_price,
            display_order: display_order(row.display_order)?,
            name: row.name.trim().to_string(),
            description: normalize_optional(row.description),
            badge: normalize_optional(row.badge),
            icon,
            id: row.id,
            is_active: row.is_active,
        })
    }
}

impl From<&Size> for SizeRecord {
    fn from(size: &Size) -> Self {
        SizeRecord {
            id: size.id.clone(),
            name: size.name.clone(),
            price_cents: size.price.cents(),
            display_order: size.display_order.into(),
            is_active: size.is_active,
        }
    }
}

impl From<&Topping> for ToppingRecord {
    fn from(topping: &Topping) -> Self {
        ToppingRecord {
            id: topping.id.clone(),
            name: topping.name.clone(),
            price_cents: topping.price.cents(),
            category: topping.category.clone(),
            display_order: topping.display_order.into(),
            is_active: topping.is_active,
        }
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            base_price_cents: product.base_price.cents(),
            badge: product.badge.clone(),
            display_order: product.display_order.into(),
            is_active: product.is_active,
        }
    }
}

impl From<&Combo> for ComboRecord {
    fn from(combo: &Combo) -> Self {
        ComboRecord {
            id: combo.id.clone(),
            name: combo.name.clone(),
            description: combo.description.clone(),
            original_price_cents: combo.original_price.map(|p| p.cents()),
            price_cents: combo.price.cents(),
            badge: combo.badge.clone(),
            icon: Some(combo.icon.to_string()),
            display_order: combo.display_order.into(),
            is_active: combo.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_row(price_cents: i64) -> SizeRecord {
        SizeRecord {
            id: "s1".to_string(),
            name: " 500ml ".to_string(),
            price_cents,
            display_order: 1,
            is_active: true,
        }
    }

    #[test]
    fn test_size_from_record() {
        let size = Size::try_from(size_row(1800)).unwrap();
        assert_eq!(size.name, "500ml");
        assert_eq!(size.price, Money::from_cents(1800));
        assert_eq!(size.display_order, 1);
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Size::try_from(size_row(-1)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_price_above_limit_rejected() {
        assert!(Size::try_from(size_row(crate::MAX_PRICE_CENTS)).is_ok());
        let err = Size::try_from(size_row(crate::MAX_PRICE_CENTS + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut row = size_row(1200);
        row.name = "   ".to_string();
        assert_eq!(
            Size::try_from(row),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_display_order_out_of_range_rejected() {
        let mut row = size_row(1200);
        row.display_order = i64::from(i32::MAX) + 1;
        assert!(Size::try_from(row).is_err());
    }

    #[test]
    fn test_combo_icon_falls_back_to_star() {
        let row = ComboRecord {
            id: "c1".to_string(),
            name: "Combo Família".to_string(),
            description: Some("   ".to_string()),
            original_price_cents: Some(8400),
            price_cents: 6990,
            badge: Some("Mais Pedido".to_string()),
            icon: Some("Gift".to_string()),
            display_order: 0,
            is_active: true,
        };

        let combo = Combo::try_from(row).unwrap();
        assert_eq!(combo.icon, ComboIcon::Star);
        assert_eq!(combo.description, None);
        assert_eq!(combo.savings(), Some(Money::from_cents(1410)));
    }

    #[test]
    fn test_topping_record_conversion_keeps_category() {
        let topping = Topping::new("t1", "Morango", Money::from_cents(300), 5).with_category("Frutas");
        let row = ToppingRecord::from(&topping);
        assert_eq!(Topping::try_from(row).unwrap(), topping);
    }
}
