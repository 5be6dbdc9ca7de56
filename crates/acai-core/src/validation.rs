//! # Validation Module
//!
//! Input validation for catalog writes and store rows.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form                                                   │
//! │  ├── Required fields, numeric inputs                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Admin commands / record mapping (Rust)                       │
//! │  └── THIS MODULE: names, prices, display order, phone numbers          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents BETWEEN 0 AND 100000000)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LEN, MAX_TEXT_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog name (size, topping, product or combo).
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LEN` characters after trimming
///
/// ## Example
/// ```rust
/// use acai_core::validation::validate_name;
///
/// assert!(validate_name("500ml").is_ok());
/// assert!(validate_name("  ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional free-text field (description, badge, category).
pub fn validate_optional_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(text) if text.trim().chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        }),
        _ => Ok(()),
    }
}

/// Trims an optional field, mapping blank text to `None`.
///
/// The admin forms send `""` for untouched optional inputs.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free topping)
/// - At most `MAX_PRICE_CENTS`
///
/// ## Example
/// ```rust
/// use acai_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1800).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a display order.
pub fn validate_display_order(order: i32) -> ValidationResult<()> {
    if order < 0 {
        return Err(ValidationError::OutOfRange {
            field: "display_order".to_string(),
            min: 0,
            max: i32::MAX as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Phone Validators
// =============================================================================

/// Validates a WhatsApp destination and returns its digits.
///
/// ## Rules
/// - `+`, spaces, hyphens and parentheses are stripped
/// - Everything else must be an ASCII digit
/// - 10 to 15 digits (country code included)
///
/// ## Example
/// ```rust
/// use acai_core::validation::validate_phone;
///
/// assert_eq!(validate_phone("+55 (77) 98133-6827").unwrap(), "5577981336827");
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-' | '(' | ')'))
        .collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(10..=15).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 10 and 15 digits".to_string(),
        });
    }

    Ok(digits)
}

// =============================================================================
// Unit Tests
// =============================================================================
