//! # API Error Type
//!
//! Unified error type for storefront and admin commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── DbError::QueryFailed("...")  ──► DATABASE_ERROR (masked)   │
//! │         ├── DbError::NotFound            ──► NOT_FOUND                 │
//! │         ├── CoreError::NoActiveSizes     ──► NO_ACTIVE_SIZES  ┐ block  │
//! │         ├── CoreError::MissingSize       ──► MISSING_SIZE     ┘ submit │
//! │         ├── CoreError::InvalidSelection  ──► INVALID_SELECTION         │
//! │         ├── CoreError::LoadFailure       ──► LOAD_FAILURE              │
//! │         └── ValidationError              ──► VALIDATION_ERROR          │
//! │                                                                         │
//! │  Frontend receives { "code": "MISSING_SIZE", "message": "..." }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use acai_core::{CoreError, ValidationError};
use acai_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Size not found: 3f2a..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// The catalog has no active sizes; ordering is impossible
    NoActiveSizes,

    /// Pricing attempted without a size
    MissingSize,

    /// A size or topping id is unknown or inactive
    InvalidSelection,

    /// The catalog could not be read
    LoadFailure,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// True when the catalog itself leaves no size to order, as opposed to
    /// a choice the customer can correct.
    pub fn blocks_submission(&self) -> bool {
        matches!(self.code, ErrorCode::NoActiveSizes | ErrorCode::MissingSize)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ConstraintViolation(e) => {
                error!("Constraint violation: {}", e);
                ApiError::validation("Value rejected by the catalog")
            }
            DbError::InvalidRow { entity, id, reason } => {
                error!(%entity, %id, %reason, "Stored row is malformed");
                ApiError::new(ErrorCode::DatabaseError, "Catalog data is corrupted")
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::LoadFailure(cause) => {
                error!("Catalog load failed: {}", cause);
                ApiError::new(ErrorCode::LoadFailure, "Catalog could not be loaded")
            }
            CoreError::NoActiveSizes => ApiError::new(ErrorCode::NoActiveSizes, message),
            CoreError::InvalidSelection { .. } => ApiError::new(ErrorCode::InvalidSelection, message),
            CoreError::MissingSize => ApiError::new(ErrorCode::MissingSize, message),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        assert_eq!(ApiError::from(CoreError::NoActiveSizes).code, ErrorCode::NoActiveSizes);
        assert_eq!(ApiError::from(CoreError::MissingSize).code, ErrorCode::MissingSize);
        assert_eq!(
            ApiError::from(CoreError::invalid_topping("t9")).code,
            ErrorCode::InvalidSelection
        );
    }

    #[test]
    fn test_blocks_submission() {
        assert!(ApiError::from(CoreError::NoActiveSizes).blocks_submission());
        assert!(ApiError::from(CoreError::MissingSize).blocks_submission());
        assert!(!ApiError::from(CoreError::invalid_size("s9")).blocks_submission());
        assert!(!ApiError::validation("bad").blocks_submission());
    }

    #[test]
    fn test_internal_details_are_masked() {
        let err = ApiError::from(DbError::QueryFailed("no such table: sizes".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("sizes"));

        let err = ApiError::from(CoreError::LoadFailure("disk I/O error".to_string()));
        assert_eq!(err.code, ErrorCode::LoadFailure);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Size", "s1")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Size not found: s1");
    }
}
