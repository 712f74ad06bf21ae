//! Error codes for the tyre workflow API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the tyre workflow API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// Token is valid but no local user carries its object id
    ForbiddenUserNotFound,

    // Request Validation
    /// A required request field is absent or blank
    MissingField,
    /// Phone number failed the digit rules
    InvalidPhone,
    /// Unknown request status string
    InvalidStatus,
    /// Date could not be parsed
    InvalidDate,
    /// Path id is not a positive integer
    InvalidId,
    /// Formspree key is neither an id nor a usable URL
    InvalidFormKey,
    /// Supplier has no form relay key configured
    SupplierMissingFormKey,
    /// Order can only be placed on completed requests
    RequestNotComplete,
    /// Vehicle already has an open request
    VehicleHasOpenRequest,
    /// Vehicle had a request fulfilled inside the cooldown window
    VehicleRecentlyServiced,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Request not found
    RequestNotFound,
    /// Soft-deleted request not found in backups
    DeletedRequestNotFound,
    /// Supplier not found
    SupplierNotFound,
    /// Vehicle not found
    VehicleNotFound,
    /// Tire details not found
    TireDetailsNotFound,
    /// Receipt not found
    ReceiptNotFound,
    /// User not found
    UserNotFound,
    /// No route matched the request path
    RouteNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Vehicle number already registered
    VehicleExists,
    /// Tire size already catalogued
    TireSizeExists,
    /// Receipt number collided after all retries
    ReceiptNumberConflict,
    /// Restore target id is held by a live request
    RequestIdConflict,
    /// Unique email constraint
    UniqueEmail,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Upstream
    /// Order email relay rejected or failed the send
    OrderEmailFailed,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Unique constraint violation (generic 409)
    UniqueViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            // Request Validation
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidFormKey => "INVALID_FORM_KEY",
            Self::SupplierMissingFormKey => "SUPPLIER_MISSING_FORM_KEY",
            Self::RequestNotComplete => "REQUEST_NOT_COMPLETE",
            Self::VehicleHasOpenRequest => "VEHICLE_HAS_OPEN_REQUEST",
            Self::VehicleRecentlyServiced => "VEHICLE_RECENTLY_SERVICED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::DeletedRequestNotFound => "DELETED_REQUEST_NOT_FOUND",
            Self::SupplierNotFound => "SUPPLIER_NOT_FOUND",
            Self::VehicleNotFound => "VEHICLE_NOT_FOUND",
            Self::TireDetailsNotFound => "TIRE_DETAILS_NOT_FOUND",
            Self::ReceiptNotFound => "RECEIPT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::VehicleExists => "VEHICLE_EXISTS",
            Self::TireSizeExists => "TIRE_SIZE_EXISTS",
            Self::ReceiptNumberConflict => "RECEIPT_NUMBER_CONFLICT",
            Self::RequestIdConflict => "REQUEST_ID_CONFLICT",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            // Upstream
            Self::OrderEmailFailed => "ORDER_EMAIL_FAILED",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(
            ErrorCode::ForbiddenUserNotFound.as_str(),
            "FORBIDDEN_USER_NOT_FOUND"
        );
        assert_eq!(ErrorCode::MissingField.as_str(), "MISSING_FIELD");
        assert_eq!(ErrorCode::InvalidStatus.as_str(), "INVALID_STATUS");
        assert_eq!(
            ErrorCode::SupplierMissingFormKey.as_str(),
            "SUPPLIER_MISSING_FORM_KEY"
        );
        assert_eq!(
            ErrorCode::RequestNotComplete.as_str(),
            "REQUEST_NOT_COMPLETE"
        );
        assert_eq!(
            ErrorCode::VehicleHasOpenRequest.as_str(),
            "VEHICLE_HAS_OPEN_REQUEST"
        );
        assert_eq!(
            ErrorCode::DeletedRequestNotFound.as_str(),
            "DELETED_REQUEST_NOT_FOUND"
        );
        assert_eq!(ErrorCode::RouteNotFound.as_str(), "ROUTE_NOT_FOUND");
        assert_eq!(ErrorCode::TireSizeExists.as_str(), "TIRE_SIZE_EXISTS");
        assert_eq!(ErrorCode::RequestIdConflict.as_str(), "REQUEST_ID_CONFLICT");
        assert_eq!(ErrorCode::OrderEmailFailed.as_str(), "ORDER_EMAIL_FAILED");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::VehicleExists), "VEHICLE_EXISTS");
        assert_eq!(format!("{}", ErrorCode::ReceiptNotFound), "RECEIPT_NOT_FOUND");
        assert_eq!(
            format!("{}", ErrorCode::UniqueViolation),
            "UNIQUE_VIOLATION"
        );
    }
}
