//! # Error Types
//!
//! Domain-specific error types for acai-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  acai-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog, selection and pricing failures        │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  acai-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the UI layer sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is returned to the caller. Nothing here is logged and
//! dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Which catalog entity a selection referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Size,
    Topping,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Size => f.write_str("size"),
            SelectionKind::Topping => f.write_str("topping"),
        }
    }
}

/// Order engine errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    /// The catalog store could not be read.
    ///
    /// ## When This Occurs
    /// - Database unavailable or query failed
    /// - Recoverable: reload the catalog
    #[error("Catalog could not be loaded: {0}")]
    LoadFailure(String),

    /// The catalog loaded but has no active sizes.
    ///
    /// ## User Workflow
    /// ```text
    /// Open product ──► sizes loaded: [] ──► NoActiveSizes
    ///                                          │
    ///                                          ▼
    ///                           "Finalizar Pedido" disabled
    /// ```
    #[error("No sizes are available")]
    NoActiveSizes,

    /// A selection references an unknown or inactive entity.
    ///
    /// ## When This Occurs
    /// - The client holds a stale id after the admin deactivated a topping
    /// - Toppings were toggled before the topping list finished loading
    #[error("Invalid {kind} selection: {id}")]
    InvalidSelection { kind: SelectionKind, id: String },

    /// An order was priced without a size.
    #[error("A size must be chosen before the order can be priced")]
    MissingSize,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidSelection error for a size id.
    pub fn invalid_size(id: impl Into<String>) -> Self {
        CoreError::InvalidSelection {
            kind: SelectionKind::Size,
            id: id.into(),
        }
    }

    /// Creates an InvalidSelection error for a topping id.
    pub fn invalid_topping(id: impl Into<String>) -> Self {
        CoreError::InvalidSelection {
            kind: SelectionKind::Topping,
            id: id.into(),
        }
    }

    /// True when the error must keep order submission disabled.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, CoreError::NoActiveSizes | CoreError::MissingSize)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any admin write reaches the catalog store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable price, malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_topping("t9");
        assert_eq!(err.to_string(), "Invalid topping selection: t9");

        assert_eq!(
            CoreError::MissingSize.to_string(),
            "A size must be chosen before the order can be priced"
        );
    }

    #[test]
    fn test_blocks_submission() {
        assert!(CoreError::NoActiveSizes.blocks_submission());
        assert!(CoreError::MissingSize.blocks_submission());
        assert!(!CoreError::invalid_size("s1").blocks_submission());
        assert!(!CoreError::LoadFailure("offline".into()).blocks_submission());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
