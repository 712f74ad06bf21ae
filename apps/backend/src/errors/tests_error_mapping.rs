// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use serde_json::json;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(
        ValidationKind::MissingField,
        "Missing required field: userId",
    );
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::MissingField);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.detail(), "Missing required field: userId");
    assert!(app.extensions().is_none());
}

#[test]
fn maps_open_request_with_extensions() {
    let de = DomainError::validation(
        ValidationKind::VehicleHasOpenRequest {
            existing_request_id: 7,
            existing_status: "supervisor approved".into(),
        },
        "pending",
    );
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::VehicleHasOpenRequest);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(
        app.extensions().cloned(),
        Some(json!({
            "existingRequestId": 7,
            "existingRequestStatus": "supervisor approved",
        }))
    );
}

#[test]
fn maps_request_not_complete_with_current_status() {
    let de = DomainError::validation(
        ValidationKind::RequestNotComplete {
            current_status: "engineer approved".into(),
        },
        "Request must be complete before placing order",
    );
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "REQUEST_NOT_COMPLETE");
    assert_eq!(app.extensions().unwrap()["currentStatus"], "engineer approved");
}

#[test]
fn maps_conflicts() {
    let vehicle = DomainError::conflict(ConflictKind::VehicleExists, "exists");
    let app: AppError = vehicle.into();
    assert_eq!(app.code().as_str(), "VEHICLE_EXISTS");
    assert_eq!(app.status().as_u16(), 409);

    let restore = DomainError::conflict(ConflictKind::RequestIdConflict, "taken");
    let app: AppError = restore.into();
    assert_eq!(app.code().as_str(), "REQUEST_ID_CONFLICT");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Request, "Request not found");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "REQUEST_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let nf = DomainError::not_found(NotFoundKind::DeletedRequest, "gone");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "DELETED_REQUEST_NOT_FOUND");
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let mail = DomainError::infra(InfraErrorKind::MailRelay, "relay said no");
    let app: AppError = mail.into();
    assert_eq!(app.code().as_str(), "ORDER_EMAIL_FAILED");
    assert_eq!(app.status().as_u16(), 502);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);
}
