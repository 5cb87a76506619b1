//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── Store rule failed?  CoreError ──┐                           │
//! │         │                                   ├──► ApiError               │
//! │         ├── Persist failed?     DbError ────┘      │                    │
//! │         │                                          ▼                    │
//! │         │                            notification { message, kind }     │
//! │         ▼                                                               │
//! │  Success ──► notification { message, "success" }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `ApiError` carries the severity its notification is shown with.
//! A duplicate coupon code is a `warning`; everything else is an `error`.

use serde::Serialize;
use storefront_core::CoreError;
use storefront_db::DbError;

use crate::state::NotificationKind;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "COUPON_NOT_APPLICABLE",
///   "message": "Percentage coupon 'PERCENT10' requires a total of at least ₩10,000 (current ₩5,000)",
///   "severity": "error"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// How loudly the frontend should surface this
    pub severity: NotificationKind,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or coupon not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Internal error
    Internal,

    /// Cart operation failed
    CartError,

    /// Not enough stock left for the request
    InsufficientStock,

    /// Coupon code already registered
    DuplicateCoupon,

    /// Coupon cannot be applied to the current cart
    CouponNotApplicable,
}

impl ApiError {
    /// Creates a new error-level API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            severity: NotificationKind::Error,
        }
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: NotificationKind) -> Self {
        self.severity = severity;
        self
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
}

/// Result type for storefront commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Busy(_) | DbError::PoolExhausted => ApiError::new(
                ErrorCode::DatabaseError,
                "The store is busy, please try again",
            ),
            DbError::StorageFull(_) => ApiError::new(
                ErrorCode::DatabaseError,
                "Storage is full; changes were not saved",
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            other => {
                // Details stay in the log
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Could not save changes")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();

        match err {
            CoreError::DuplicateCouponCode { .. } => {
                ApiError::new(ErrorCode::DuplicateCoupon, message)
                    .with_severity(NotificationKind::Warning)
            }
            CoreError::CouponThresholdNotMet { .. } => {
                ApiError::new(ErrorCode::CouponNotApplicable, message)
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, message)
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CouponNotFound(code) => ApiError::not_found("Coupon", &code),
            CoreError::ItemNotInCart(_) | CoreError::EmptyCart => {
                ApiError::new(ErrorCode::CartError, message)
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
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
    use storefront_core::{Money, ValidationError};

    #[test]
    fn test_duplicate_coupon_is_a_warning() {
        let err = ApiError::from(CoreError::DuplicateCouponCode {
            code: "AMOUNT5000".to_string(),
        });
        assert_eq!(err.code, ErrorCode::DuplicateCoupon);
        assert_eq!(err.severity, NotificationKind::Warning);
    }

    #[test]
    fn test_threshold_and_stock_are_errors() {
        let err = ApiError::from(CoreError::CouponThresholdNotMet {
            code: "PERCENT10".to_string(),
            minimum: Money::new(10_000),
            current: Money::new(5_000),
        });
        assert_eq!(err.code, ErrorCode::CouponNotApplicable);
        assert_eq!(err.severity, NotificationKind::Error);

        let err = ApiError::from(CoreError::InsufficientStock {
            product_id: "p1".to_string(),
            available: 0,
            requested: 1,
        });
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.severity, NotificationKind::Error);
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err = ApiError::from(CoreError::from(ValidationError::Required {
            field: "coupon code".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "coupon code is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Coupon", "NOPE");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Coupon not found: NOPE");
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = ApiError::from(DbError::StorageFull("disk I/O".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk I/O"));

        let err = ApiError::from(DbError::QueryFailed("no such table: kv_store".to_string()));
        assert_eq!(err.message, "Could not save changes");
    }
}
