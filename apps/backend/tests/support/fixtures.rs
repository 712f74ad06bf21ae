//! Seed rows and canned request bodies.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde_json::{json, Value};
use tyre_backend::entities::{suppliers, users};
use tyre_backend::repos::suppliers::{self as suppliers_repo, SupplierWrite};
use tyre_backend::repos::users::{self as users_repo, UserCreate};
use tyre_backend::state::app_state::AppState;

use super::app::call_json;

pub async fn seed_user(state: &AppState, azure_id: &str, email: &str, role: &str) -> users::Model {
    let db = state.db().expect("test state has a database");
    users_repo::create_user(
        db,
        UserCreate::new(azure_id, email)
            .with_name(format!("{role} user"))
            .with_role(role),
    )
    .await
    .expect("seed user")
}

pub async fn seed_supplier(state: &AppState, name: &str, formsfree_key: &str) -> suppliers::Model {
    let db = state.db().expect("test state has a database");
    suppliers_repo::create(
        db,
        SupplierWrite {
            name: name.to_string(),
            email: format!("orders@{}.example", name.to_lowercase().replace(' ', "")),
            phone: Some("0112345678".to_string()),
            address: None,
            formsfree_key: formsfree_key.to_string(),
        },
    )
    .await
    .expect("seed supplier")
}

/// A complete, valid body for `POST /api/requests`.
pub fn new_request_body(vehicle_number: &str, user_id: i64) -> Value {
    json!({
        "userId": user_id,
        "vehicleId": 12,
        "vehicleNumber": vehicle_number,
        "quantity": 4,
        "tubesQuantity": "2",
        "tireSize": "195/65R15",
        "requestReason": "Worn tread",
        "requesterName": "Nimal Perera",
        "requesterEmail": "nimal@example.lk",
        "requesterPhone": "77-123 4567",
        "vehicleBrand": "Toyota",
        "vehicleModel": "HiAce",
        "lastReplacementDate": "2024-11-02",
        "existingTireMake": "Bridgestone",
        "tireSizeRequired": "195/65R15",
        "presentKmReading": 120500,
        "previousKmReading": "80500",
        "tireWearPattern": "Even",
        "userSection": "Fleet",
        "costCenter": "CC-100",
        "deliveryOfficeName": "Head Office",
        "deliveryTown": "Colombo",
        "totalPrice": "100000.00",
        "images": ["https://img.example/1.jpg", "", null, "https://img.example/4.jpg"],
    })
}

/// File a request and walk it to `complete`; returns its id.
pub async fn complete_request<S>(app: &S, vehicle_number: &str, user_id: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let (status, created) = call_json(
        app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(vehicle_number, user_id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let id = created["id"].as_i64().expect("request id");

    let (status, body) = call_json(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/requests/{id}/status"))
            .set_json(json!({ "status": "complete", "notes": "Fitted", "userId": 7 }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    id
}
