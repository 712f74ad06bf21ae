mod common;
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_plate;
use serde_json::json;
use support::{call, call_json, complete_request, test_app, test_state, RecordingMailer};

#[actix_web::test]
async fn explicit_receipt_crud() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let (status, created) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/api/receipts")
            .set_json(json!({
                "requestId": "17",
                "orderNumber": "PO-77",
                "totalAmount": 48000.5,
                "customerOfficerId": 12,
                "customerOfficerName": "Kamal Silva",
                "vehicleNumber": "WP CAB-1234",
                "supplierName": "Lanka Tyres",
                "items": [{
                    "description": "195/65R15 Tires",
                    "tireSize": "195/65R15",
                    "quantity": 2,
                    "tubesQuantity": 0,
                    "unitPrice": 24000.25,
                    "total": 48000.5
                }],
                "orderPlacedDate": "2025-03-04",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["requestId"], 17);
    assert_eq!(created["totalAmount"], 48000.5);
    assert_eq!(created["items"][0]["tireSize"], "195/65R15");
    assert!(created["receiptNumber"].as_str().unwrap().starts_with("RCP-"));
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = call_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/receipts/{id}"))
            .set_json(json!({ "notes": "Paid by cheque", "supplierName": null }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["notes"], "Paid by cheque");
    assert!(updated["supplierName"].is_null());
    assert_eq!(updated["orderNumber"], "PO-77");

    let (_, mine) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/receipts/customer-officer/12")
            .to_request(),
    )
    .await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (_, others) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/receipts/customer-officer/13")
            .to_request(),
    )
    .await;
    assert_eq!(others, json!([]));

    let (status, formatted) = call_json(
        &app,
        test::TestRequest::get().uri("/api/receipts/order/PO-77").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(formatted["id"], id.to_string());
    assert_eq!(formatted["supplierName"], "");
    assert_eq!(formatted["customerOfficerId"], "12");

    let resp = call(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/receipts/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = call(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/receipts/{id}"))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "RECEIPT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Receipt not found"),
    )
    .await;
}

#[actix_web::test]
async fn generate_from_stored_request() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;
    let plate = unique_plate();
    let id = complete_request(&app, &plate, 5).await;

    let (status, receipt) = call_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/receipts/generate/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["requestId"], id);
    assert_eq!(receipt["vehicleNumber"], plate);
    assert_eq!(receipt["vehicleBrand"], "Toyota");
    assert_eq!(receipt["customerOfficerName"], "Nimal Perera");
    assert_eq!(receipt["items"][0]["quantity"], 4);
    assert_eq!(receipt["items"][0]["tubesQuantity"], 2);

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/receipts/generate/9999")
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "REQUEST_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}

#[actix_web::test]
async fn unknown_order_key() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let resp = call(
        &app,
        test::TestRequest::get().uri("/api/receipts/order/NOPE").to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "RECEIPT_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}
