use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::infra::db_errors::map_db_err;
use crate::trace_ctx;

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { code: ErrorCode, detail: String },
    #[error("Timeout: {detail}")]
    Timeout { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    /// Any other error plus machine-readable fields for the client.
    #[error("{inner}")]
    WithExtensions {
        inner: Box<AppError>,
        extensions: Value,
    },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Upstream { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Timeout { .. } => ErrorCode::DbTimeout,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::WithExtensions { inner, .. } => inner.code(),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::Upstream { detail, .. }
            | AppError::Timeout { detail }
            | AppError::Db { detail }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
            AppError::DbUnavailable => "Database unavailable".to_string(),
            AppError::WithExtensions { inner, .. } => inner.detail(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::WithExtensions { inner, .. } => inner.status(),
        }
    }

    pub fn extensions(&self) -> Option<&Value> {
        match self {
            AppError::WithExtensions { extensions, .. } => Some(extensions),
            _ => None,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedMissingBearer,
            detail: "Missing or malformed Bearer token".to_string(),
        }
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidJwt,
            detail: "Invalid JWT".to_string(),
        }
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedExpiredJwt,
            detail: "Token expired".to_string(),
        }
    }

    pub fn forbidden_user_not_found() -> Self {
        Self::Forbidden {
            code: ErrorCode::ForbiddenUserNotFound,
            detail: "User not found in database".to_string(),
        }
    }

    pub fn upstream(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Upstream {
            code,
            detail: detail.into(),
        }
    }

    /// Attach an `extensions` object to the rendered problem document.
    pub fn with_extensions(self, extensions: Value) -> Self {
        match self {
            AppError::WithExtensions { inner, .. } => AppError::WithExtensions { inner, extensions },
            other => AppError::WithExtensions {
                inner: Box::new(other),
                extensions,
            },
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => match kind {
                ValidationKind::MissingField => AppError::invalid(ErrorCode::MissingField, detail),
                ValidationKind::InvalidPhone => AppError::invalid(ErrorCode::InvalidPhone, detail),
                ValidationKind::InvalidStatus => {
                    AppError::invalid(ErrorCode::InvalidStatus, detail)
                }
                ValidationKind::InvalidDate => AppError::invalid(ErrorCode::InvalidDate, detail),
                ValidationKind::InvalidFormKey => {
                    AppError::invalid(ErrorCode::InvalidFormKey, detail)
                }
                ValidationKind::SupplierMissingFormKey => {
                    AppError::invalid(ErrorCode::SupplierMissingFormKey, detail)
                }
                ValidationKind::RequestNotComplete { current_status } => {
                    AppError::invalid(ErrorCode::RequestNotComplete, detail)
                        .with_extensions(json!({ "currentStatus": current_status }))
                }
                ValidationKind::VehicleHasOpenRequest {
                    existing_request_id,
                    existing_status,
                } => AppError::invalid(ErrorCode::VehicleHasOpenRequest, detail).with_extensions(
                    json!({
                        "existingRequestId": existing_request_id,
                        "existingRequestStatus": existing_status,
                    }),
                ),
                ValidationKind::VehicleRecentlyServiced {
                    last_request_date,
                    days_remaining,
                } => AppError::invalid(ErrorCode::VehicleRecentlyServiced, detail)
                    .with_extensions(json!({
                        "lastRequestDate": last_request_date,
                        "daysRemaining": days_remaining,
                    })),
                ValidationKind::Other(_) => AppError::invalid(ErrorCode::ValidationError, detail),
            },
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::VehicleExists => ErrorCode::VehicleExists,
                    ConflictKind::TireSizeExists => ErrorCode::TireSizeExists,
                    ConflictKind::ReceiptNumber => ErrorCode::ReceiptNumberConflict,
                    ConflictKind::RequestIdConflict => ErrorCode::RequestIdConflict,
                    ConflictKind::UniqueEmail => ErrorCode::UniqueEmail,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Request => ErrorCode::RequestNotFound,
                    NotFoundKind::DeletedRequest => ErrorCode::DeletedRequestNotFound,
                    NotFoundKind::Supplier => ErrorCode::SupplierNotFound,
                    NotFoundKind::Vehicle => ErrorCode::VehicleNotFound,
                    NotFoundKind::TireDetails => ErrorCode::TireDetailsNotFound,
                    NotFoundKind::Receipt => ErrorCode::ReceiptNotFound,
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Timeout { detail },
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable,
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::MailRelay => AppError::upstream(ErrorCode::OrderEmailFailed, detail),
                InfraErrorKind::Other(_) => AppError::Internal {
                    code: ErrorCode::Internal,
                    detail,
                },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(map_db_err(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://tyre-workflow.app/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
            trace_id: trace_id.clone(),
            extensions: self.extensions().cloned(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header((trace_ctx::TRACE_HEADER, trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_code_title_cases_words() {
        assert_eq!(AppError::humanize_code("REQUEST_NOT_FOUND"), "Request Not Found");
        assert_eq!(AppError::humanize_code("CONFLICT"), "Conflict");
    }

    #[test]
    fn with_extensions_keeps_code_and_status() {
        let err = AppError::invalid(ErrorCode::RequestNotComplete, "not yet")
            .with_extensions(json!({ "currentStatus": "approved" }));
        assert_eq!(err.code(), ErrorCode::RequestNotComplete);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "not yet");
        assert_eq!(err.extensions().unwrap()["currentStatus"], "approved");
    }

    #[test]
    fn with_extensions_does_not_nest() {
        let err = AppError::conflict(ErrorCode::Conflict, "x")
            .with_extensions(json!({ "a": 1 }))
            .with_extensions(json!({ "b": 2 }));
        match err {
            AppError::WithExtensions { inner, extensions } => {
                assert!(matches!(*inner, AppError::Conflict { .. }));
                assert_eq!(extensions, json!({ "b": 2 }));
            }
            _ => panic!("expected WithExtensions"),
        }
    }
}
