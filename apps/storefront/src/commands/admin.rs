//! # Admin Commands
//!
//! Back-office CRUD over sizes, toppings, products and combos.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_size(db, SizeInput { name: " 500ml ", price: "18,00", .. })     │
//! │       │                                                                 │
//! │       ├── validate_name(name)            blank / > 100 chars? ──► 400   │
//! │       ├── Money::parse_decimal(price)    "18,00" → 1800                 │
//! │       ├── validate_price_cents(1800)     negative? ──────────► 400      │
//! │       ├── normalize_optional(..)         "" → None                      │
//! │       ├── display_order                  None → row count               │
//! │       ▼                                                                 │
//! │  db.sizes().insert(&size)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Size { id: uuid v4, name: "500ml", price: 1800, .. }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing reaches the store until every field of the input is valid.
//! Deletes are hard deletes and need a [`Confirmation::Confirmed`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use acai_core::validation::{
    normalize_optional, validate_display_order, validate_name, validate_optional_text,
    validate_price_cents,
};
use acai_core::{Combo, ComboIcon, Money, Product, Size, Topping, ValidationError};
use acai_db::{generate_id, Database};

use crate::error::ApiError;

// =============================================================================
// Inputs
// =============================================================================

/// Answer to "Tem certeza que deseja excluir?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

fn default_active() -> bool {
    true
}

/// Size form. Prices are decimal text as typed ("18.00", "18,5").
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInput {
    pub name: String,
    pub price: String,
    /// `None` appends on create and keeps the current position on update.
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SizeInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        SizeInput {
            name: name.into(),
            price: price.into(),
            display_order: None,
            is_active: true,
        }
    }
}

/// Topping form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingInput {
    pub name: String,
    pub price: String,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ToppingInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        ToppingInput {
            name: name.into(),
            price: price.into(),
            category: None,
            display_order: None,
            is_active: true,
        }
    }
}

/// Product form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub base_price: String,
    pub badge: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, base_price: impl Into<String>) -> Self {
        ProductInput {
            name: name.into(),
            description: None,
            base_price: base_price.into(),
            badge: None,
            display_order: None,
            is_active: true,
        }
    }
}

/// Combo form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboInput {
    pub name: String,
    pub description: Option<String>,
    /// Blank or missing means no struck-through price.
    pub original_price: Option<String>,
    pub price: String,
    pub badge: Option<String>,
    /// "Star" or "Flame"; blank means Star.
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ComboInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        ComboInput {
            name: name.into(),
            description: None,
            original_price: None,
            price: price.into(),
            badge: None,
            icon: None,
            display_order: None,
            is_active: true,
        }
    }
}

// =============================================================================
// Field Validation
// =============================================================================

fn parse_name(name: &str) -> Result<String, ApiError> {
    validate_name(name)?;
    Ok(name.trim().to_string())
}

fn parse_price(text: &str) -> Result<Money, ApiError> {
    let price = Money::parse_decimal(text)?;
    validate_price_cents(price.cents())?;
    Ok(price)
}

fn parse_optional_price(text: Option<String>) -> Result<Option<Money>, ApiError> {
    normalize_optional(text).map(|t| parse_price(&t)).transpose()
}

fn parse_text(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    let value = normalize_optional(value);
    validate_optional_text(field, value.as_deref())?;
    Ok(value)
}

fn parse_icon(icon: Option<String>) -> Result<ComboIcon, ApiError> {
    match normalize_optional(icon) {
        None => Ok(ComboIcon::default()),
        Some(text) => text.parse::<ComboIcon>().map_err(|reason| {
            ApiError::from(ValidationError::InvalidFormat {
                field: "icon".to_string(),
                reason,
            })
        }),
    }
}

fn parse_order(order: Option<i32>) -> Result<Option<i32>, ApiError> {
    if let Some(order) = order {
        validate_display_order(order)?;
    }
    Ok(order)
}

// =============================================================================
// Sizes
// =============================================================================

/// Every size, active or not, in display order.
pub async fn list_sizes(db: &Database) -> Result<Vec<Size>, ApiError> {
    Ok(db.sizes().list_all().await?)
}

pub async fn get_size(db: &Database, id: &str) -> Result<Size, ApiError> {
    db.sizes()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Size", id))
}

pub async fn create_size(db: &Database, input: SizeInput) -> Result<Size, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let display_order = match parse_order(input.display_order)? {
        Some(order) => order,
        None => db.sizes().next_display_order().await?,
    };

    let mut size = Size::new(generate_id(), name, price, display_order);
    size.is_active = input.is_active;

    let size = db.sizes().insert(&size).await?;
    info!(id = %size.id, name = %size.name, "Size created");
    Ok(size)
}

pub async fn update_size(db: &Database, id: &str, input: SizeInput) -> Result<Size, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let display_order = parse_order(input.display_order)?;

    let mut size = get_size(db, id).await?;
    size.name = name;
    size.price = price;
    size.display_order = display_order.unwrap_or(size.display_order);
    size.is_active = input.is_active;

    db.sizes().update(&size).await?;
    info!(id = %size.id, "Size updated");
    Ok(size)
}

/// Deletes a size. Returns false when the confirmation was declined.
pub async fn delete_size(db: &Database, id: &str, confirmation: Confirmation) -> Result<bool, ApiError> {
    if confirmation == Confirmation::Declined {
        debug!(id = %id, "Size delete declined");
        return Ok(false);
    }
    db.sizes().delete(id).await?;
    info!(id = %id, "Size deleted");
    Ok(true)
}

/// Flips `is_active`. Returns the new value.
pub async fn toggle_size(db: &Database, id: &str) -> Result<bool, ApiError> {
    let active = db.sizes().toggle_active(id).await?;
    info!(id = %id, active, "Size toggled");
    Ok(active)
}

// =============================================================================
// Toppings
// =============================================================================

pub async fn list_toppings(db: &Database) -> Result<Vec<Topping>, ApiError> {
    Ok(db.toppings().list_all().await?)
}

pub async fn get_topping(db: &Database, id: &str) -> Result<Topping, ApiError> {
    db.toppings()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Topping", id))
}

pub async fn create_topping(db: &Database, input: ToppingInput) -> Result<Topping, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let category = parse_text("category", input.category)?;
    let display_order = match parse_order(input.display_order)? {
        Some(order) => order,
        None => db.toppings().next_display_order().await?,
    };

    let mut topping = Topping::new(generate_id(), name, price, display_order);
    topping.category = category;
    topping.is_active = input.is_active;

    let topping = db.toppings().insert(&topping).await?;
    info!(id = %topping.id, name = %topping.name, "Topping created");
    Ok(topping)
}

pub async fn update_topping(db: &Database, id: &str, input: ToppingInput) -> Result<Topping, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let category = parse_text("category", input.category)?;
    let display_order = parse_order(input.display_order)?;

    let mut topping = get_topping(db, id).await?;
    topping.name = name;
    topping.price = price;
    topping.category = category;
    topping.display_order = display_order.unwrap_or(topping.display_order);
    topping.is_active = input.is_active;

    db.toppings().update(&topping).await?;
    info!(id = %topping.id, "Topping updated");
    Ok(topping)
}

pub async fn delete_topping(db: &Database, id: &str, confirmation: Confirmation) -> Result<bool, ApiError> {
    if confirmation == Confirmation::Declined {
        debug!(id = %id, "Topping delete declined");
        return Ok(false);
    }
    db.toppings().delete(id).await?;
    info!(id = %id, "Topping deleted");
    Ok(true)
}

pub async fn toggle_topping(db: &Database, id: &str) -> Result<bool, ApiError> {
    let active = db.toppings().toggle_active(id).await?;
    info!(id = %id, active, "Topping toggled");
    Ok(active)
}

// =============================================================================
// Products
// =============================================================================

pub async fn list_products(db: &Database) -> Result<Vec<Product>, ApiError> {
    Ok(db.products().list_all().await?)
}

pub async fn get_product(db: &Database, id: &str) -> Result<Product, ApiError> {
    db.products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))
}

pub async fn create_product(db: &Database, input: ProductInput) -> Result<Product, ApiError> {
    let name = parse_name(&input.name)?;
    let base_price = parse_price(&input.base_price)?;
    let description = parse_text("description", input.description)?;
    let badge = parse_text("badge", input.badge)?;
    let display_order = match parse_order(input.display_order)? {
        Some(order) => order,
        None => db.products().next_display_order().await?,
    };

    let product = Product {
        id: generate_id(),
        name,
        description,
        base_price,
        badge,
        display_order,
        is_active: input.is_active,
    };

    let product = db.products().insert(&product).await?;
    info!(id = %product.id, name = %product.name, "Product created");
    Ok(product)
}

pub async fn update_product(db: &Database, id: &str, input: ProductInput) -> Result<Product, ApiError> {
    let name = parse_name(&input.name)?;
    let base_price = parse_price(&input.base_price)?;
    let description = parse_text("description", input.description)?;
    let badge = parse_text("badge", input.badge)?;
    let display_order = parse_order(input.display_order)?;

    let mut product = get_product(db, id).await?;
    product.name = name;
    product.base_price = base_price;
    product.description = description;
    product.badge = badge;
    product.display_order = display_order.unwrap_or(product.display_order);
    product.is_active = input.is_active;

    db.products().update(&product).await?;
    info!(id = %product.id, "Product updated");
    Ok(product)
}

pub async fn delete_product(db: &Database, id: &str, confirmation: Confirmation) -> Result<bool, ApiError> {
    if confirmation == Confirmation::Declined {
        debug!(id = %id, "Product delete declined");
        return Ok(false);
    }
    db.products().delete(id).await?;
    info!(id = %id, "Product deleted");
    Ok(true)
}

pub async fn toggle_product(db: &Database, id: &str) -> Result<bool, ApiError> {
    let active = db.products().toggle_active(id).await?;
    info!(id = %id, active, "Product toggled");
    Ok(active)
}

// =============================================================================
// Combos
// =============================================================================

pub async fn list_combos(db: &Database) -> Result<Vec<Combo>, ApiError> {
    Ok(db.combos().list_all().await?)
}

pub async fn get_combo(db: &Database, id: &str) -> Result<Combo, ApiError> {
    db.combos()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Combo", id))
}

pub async fn create_combo(db: &Database, input: ComboInput) -> Result<Combo, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let original_price = parse_optional_price(input.original_price)?;
    let description = parse_text("description", input.description)?;
    let badge = parse_text("badge", input.badge)?;
    let icon = parse_icon(input.icon)?;
    let display_order = match parse_order(input.display_order)? {
        Some(order) => order,
        None => db.combos().next_display_order().await?,
    };

    let combo = Combo {
        id: generate_id(),
        name,
        description,
        original_price,
        price,
        badge,
        icon,
        display_order,
        is_active: input.is_active,
    };

    let combo = db.combos().insert(&combo).await?;
    info!(id = %combo.id, name = %combo.name, "Combo created");
    Ok(combo)
}

pub async fn update_combo(db: &Database, id: &str, input: ComboInput) -> Result<Combo, ApiError> {
    let name = parse_name(&input.name)?;
    let price = parse_price(&input.price)?;
    let original_price = parse_optional_price(input.original_price)?;
    let description = parse_text("description", input.description)?;
    let badge = parse_text("badge", input.badge)?;
    let icon = parse_icon(input.icon)?;
    let display_order = parse_order(input.display_order)?;

    let mut combo = get_combo(db, id).await?;
    combo.name = name;
    combo.price = price;
    combo.original_price = original_price;
    combo.description = description;
    combo.badge = badge;
    combo.icon = icon;
    combo.display_order = display_order.unwrap_or(combo.display_order);
    combo.is_active = input.is_active;

    db.combos().update(&combo).await?;
    info!(id = %combo.id, "Combo updated");
    Ok(combo)
}

pub async fn delete_combo(db: &Database, id: &str, confirmation: Confirmation) -> Result<bool, ApiError> {
    if confirmation == Confirmation::Declined {
        debug!(id = %id, "Combo delete declined");
        return Ok(false);
    }
    db.combos().delete(id).await?;
    info!(id = %id, "Combo deleted");
    Ok(true)
}

pub async fn toggle_combo(db: &Database, id: &str) -> Result<bool, ApiError> {
    let active = db.combos().toggle_active(id).await?;
    info!(id = %id, active, "Combo toggled");
    Ok(active)
}

// =============================================================================
// Unit Tests
// =============================================================================
