//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here, and higher layers map
//! `DomainError` to `AppError` via `From`.

use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr, SqlErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Map a unique-violation message to a domain conflict. MySQL reports
/// `Duplicate entry 'x' for key 'table.index'`, SQLite reports
/// `UNIQUE constraint failed: table.column`; both name the column or index.
fn unique_violation_to_conflict(msg: &str) -> (ConflictKind, &'static str) {
    if msg.contains("vehicle_number") {
        (ConflictKind::VehicleExists, "Vehicle number already exists")
    } else if msg.contains("tire_size") {
        (
            ConflictKind::TireSizeExists,
            "Tire details for this size already exist",
        )
    } else if msg.contains("receipt_number") {
        (ConflictKind::ReceiptNumber, "Receipt number already exists")
    } else if msg.contains("requests.id") || msg.contains("requests.PRIMARY") {
        (
            ConflictKind::RequestIdConflict,
            "A request with this id already exists",
        )
    } else if msg.contains("email") {
        (ConflictKind::UniqueEmail, "Email already registered")
    } else {
        (
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        )
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");
        let (kind, detail) = unique_violation_to_conflict(&msg);
        return DomainError::conflict(kind, detail);
    }

    match &e {
        DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other(what.clone()),
                "Record not found",
            );
        }
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            warn!(trace_id = %trace_id, "Database pool acquire timed out");
            return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        DbErr::Query(RuntimeErr::SqlxError(inner)) | DbErr::Exec(RuntimeErr::SqlxError(inner))
            if inner.to_string().contains("timed out") =>
        {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
            return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
        }
        _ => {}
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
