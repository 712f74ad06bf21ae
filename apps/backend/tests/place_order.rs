mod common;
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_plate;
use serde_json::{json, Value};
use support::{
    call, call_json, complete_request, new_request_body, seed_supplier, test_app, test_state,
    RecordingMailer,
};

fn order_body(supplier_id: i64) -> Value {
    json!({
        "supplierId": supplier_id,
        "orderNumber": "PO-2025-001",
        "orderPlacedDate": "2025-03-04",
        "orderNotes": "Deliver before Friday",
    })
}

#[actix_web::test]
async fn order_is_emailed_recorded_and_receipted() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = test_state(mailer.clone()).await;
    let supplier = seed_supplier(&state, "Lanka Tyres", "mnqwerty").await;
    let app = test_app(state).await;
    let plate = unique_plate();
    let id = complete_request(&app, &plate, 5).await;

    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/requests/{id}/place-order"))
            .set_json(order_body(supplier.id))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["supplier"]["id"], supplier.id);
    assert_eq!(body["supplier"]["name"], "Lanka Tyres");
    assert_eq!(body["emailResult"]["success"], true);
    assert_eq!(body["orderNotes"], "Deliver before Friday");
    assert_eq!(body["receipt"]["requestId"], id);
    assert_eq!(body["receipt"]["orderNumber"], "PO-2025-001");
    assert_eq!(body["receipt"]["totalAmount"], 100000.0);
    assert_eq!(body["receipt"]["items"][0]["unitPrice"], 25000.0);
    assert!(body["receipt"]["receiptNumber"]
        .as_str()
        .unwrap()
        .starts_with("RCP-"));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].endpoint, "https://formspree.io/f/mnqwerty");
    assert_eq!(sent[0].email.subject, "🚛 SLT Mobitel Tire Order - PO-2025-001");
    assert!(sent[0].email.message.contains(&format!("Vehicle Number: {plate}")));

    let (_, request) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/requests/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(request["status"], "order placed");
    assert_eq!(request["orderNumber"], "PO-2025-001");
    assert_eq!(request["supplierName"], "Lanka Tyres");
    assert_eq!(request["customer_officer_note"], "Deliver before Friday");
    assert_eq!(request["orderPlacedDate"], "2025-03-04T00:00:00Z");

    let (status, formatted) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/receipts/order/PO-2025-001")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(formatted["orderId"], "PO-2025-001");
    assert_eq!(formatted["companyDetails"]["name"], "SLT Mobitel Tire Management");

    let (_, by_request_id) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/receipts/order/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(by_request_id["receiptNumber"], formatted["receiptNumber"]);
}

#[actix_web::test]
async fn relay_failure_writes_nothing() {
    let mailer = Arc::new(RecordingMailer::failing());
    let state = test_state(mailer.clone()).await;
    let supplier = seed_supplier(&state, "Lanka Tyres", "mnqwerty").await;
    let app = test_app(state).await;
    let id = complete_request(&app, &unique_plate(), 5).await;

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/requests/{id}/place-order"))
            .set_json(order_body(supplier.id))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "ORDER_EMAIL_FAILED",
        StatusCode::BAD_GATEWAY,
        None,
    )
    .await;

    let (_, request) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/requests/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(request["status"], "complete");
    assert!(request["orderNumber"].is_null());

    let (_, receipts) = call_json(&app, test::TestRequest::get().uri("/api/receipts").to_request()).await;
    assert_eq!(receipts, json!([]));
}

#[actix_web::test]
async fn request_must_be_complete() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let supplier = seed_supplier(&state, "Lanka Tyres", "mnqwerty").await;
    let app = test_app(state).await;

    let (_, created) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(&unique_plate(), 5))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/requests/{id}/place-order"))
            .set_json(order_body(supplier.id))
            .to_request(),
    )
    .await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "REQUEST_NOT_COMPLETE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert_eq!(problem.extensions.unwrap()["currentStatus"], "User Requested tire");
}

#[actix_web::test]
async fn checks_run_in_order() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let keyless = seed_supplier(&state, "No Form Ltd", "").await;
    let app = test_app(state).await;
    let id = complete_request(&app, &unique_plate(), 5).await;
    let uri = format!("/api/requests/{id}/place-order");

    let cases = [
        (json!({ "supplierId": 1, "orderNumber": "  " }), "MISSING_FIELD", "Order number is required"),
        (json!({ "orderNumber": "PO-1" }), "MISSING_FIELD", "Supplier ID is required"),
        (json!({ "orderNumber": "PO-1", "supplierId": 1 }), "MISSING_FIELD", "Order placed date is required"),
        (
            json!({ "orderNumber": "PO-1", "supplierId": 1, "orderPlacedDate": "04/03/2025" }),
            "INVALID_DATE",
            "Invalid order placed date format",
        ),
    ];
    for (body, code, detail) in cases {
        let resp = call(&app, test::TestRequest::post().uri(&uri).set_json(body).to_request()).await;
        assert_problem_details_from_service_response(resp, code, StatusCode::BAD_REQUEST, Some(detail))
            .await;
    }

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests/9999/place-order")
            .set_json(order_body(keyless.id))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "REQUEST_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri(&uri)
            .set_json(order_body(9999))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "SUPPLIER_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri(&uri)
            .set_json(order_body(keyless.id))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "SUPPLIER_MISSING_FORM_KEY",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
