mod common;
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_plate;
use serde_json::json;
use support::{call, call_json, new_request_body, test_app, test_state, RecordingMailer};

#[actix_web::test]
async fn create_returns_request_with_images() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;
    let plate = unique_plate();

    let (status, body) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(&plate, 5))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["vehicleNumber"], plate);
    assert_eq!(body["status"], "User Requested tire");
    assert_eq!(body["requesterPhone"], "771234567");
    assert_eq!(body["tubesQuantity"], 2);
    assert_eq!(body["lastReplacementDate"], "2024-11-02");
    assert_eq!(
        body["images"],
        json!(["https://img.example/1.jpg", "https://img.example/4.jpg"])
    );

    let id = body["id"].as_i64().unwrap();
    let (status, fetched) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/requests/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["images"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn create_reports_first_missing_field() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let mut body = new_request_body(&unique_plate(), 5);
    body["tireSize"] = json!("  ");
    body["costCenter"] = json!(null);

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_FIELD",
        StatusCode::BAD_REQUEST,
        Some("Missing required field: tireSize"),
    )
    .await;
}

#[actix_web::test]
async fn create_rejects_phone_starting_with_zero() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let mut body = new_request_body(&unique_plate(), 5);
    body["requesterPhone"] = json!("0771234567");

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PHONE",
        StatusCode::BAD_REQUEST,
        Some("cannot start with zero"),
    )
    .await;
}

#[actix_web::test]
async fn create_rejects_negative_quantity() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let mut body = new_request_body(&unique_plate(), 5);
    body["quantity"] = json!(-4);

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("quantity cannot be negative"),
    )
    .await;
}

#[actix_web::test]
async fn open_request_blocks_second_request_for_vehicle() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;
    let plate = unique_plate();

    let (_, first) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(&plate, 5))
            .to_request(),
    )
    .await;
    let first_id = first["id"].as_i64().unwrap();

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(&plate, 6))
            .to_request(),
    )
    .await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VEHICLE_HAS_OPEN_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("already has a pending tire request"),
    )
    .await;
    let extensions = problem.extensions.expect("extensions");
    assert_eq!(extensions["existingRequestId"], first_id);
    assert_eq!(extensions["existingRequestStatus"], "User Requested tire");

    let (status, restriction) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/requests/vehicle/{plate}/restrictions"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restriction["restricted"], true);
    assert_eq!(restriction["type"], "pending");
    assert_eq!(restriction["existingRequestId"], first_id);
}

#[actix_web::test]
async fn completed_request_starts_cooldown() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;
    let plate = unique_plate();

    support::complete_request(&app, &plate, 5).await;

    let (status, restriction) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/requests/vehicle/{plate}/restrictions"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restriction["restricted"], true);
    assert_eq!(restriction["type"], "recent");
    // Submitted moments ago: rounds up to one day unless the clock has not moved
    let remaining = restriction["daysRemaining"].as_i64().unwrap();
    assert!((29..=30).contains(&remaining), "{restriction}");

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/requests")
            .set_json(new_request_body(&plate, 5))
            .to_request(),
    )
    .await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VEHICLE_RECENTLY_SERVICED",
        StatusCode::BAD_REQUEST,
        Some("Please wait at least 30 days"),
    )
    .await;
    let remaining = problem.extensions.unwrap()["daysRemaining"].as_i64().unwrap();
    assert!((29..=30).contains(&remaining));
}

#[actix_web::test]
async fn unrestricted_vehicle() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let (status, body) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/requests/vehicle/NEW-0001/restrictions")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restricted"], false);
    assert!(body.get("type").is_none());
}

#[actix_web::test]
async fn status_change_records_stage_note_and_decider() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
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

    let (status, body) = call_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/requests/{id}/status"))
            .set_json(json!({
                "status": "supervisor approved",
                "notes": "Looks right",
                "role": "supervisor",
                "userId": "31",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Request status updated successfully");
    assert_eq!(body["request"]["status"], "supervisor approved");
    assert_eq!(body["request"]["supervisor_notes"], "Looks right");
    assert_eq!(body["request"]["supervisor_decision_by"], 31);
    assert!(body["request"]["engineer_note"].is_null());

    let resp = call(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/requests/{id}/status"))
            .set_json(json!({ "status": "shipped" }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_STATUS",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn partial_update_clears_null_fields() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
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
    assert_eq!(created["deliveryTown"], "Colombo");

    let (status, body) = call_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/requests/{id}"))
            .set_json(json!({ "quantity": "2", "deliveryTown": null, "comments": "Rear only" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["quantity"], 2);
    assert!(body["deliveryTown"].is_null());
    assert_eq!(body["deliveryOfficeName"], "Head Office");
    assert_eq!(body["comments"], "Rear only");
}

#[actix_web::test]
async fn lists_by_user_and_vehicle() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    for (plate, user) in [("CAB-1111", 41), ("CAB-2222", 41), ("XYZ-9999", 42)] {
        let (status, body) = call_json(
            &app,
            test::TestRequest::post()
                .uri("/api/requests")
                .set_json(new_request_body(plate, user))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (_, all) = call_json(&app, test::TestRequest::get().uri("/api/requests").to_request()).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, mine) = call_json(
        &app,
        test::TestRequest::get().uri("/api/requests/user/41").to_request(),
    )
    .await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r["userId"] == 41));

    let (_, exact) = call_json(
        &app,
        test::TestRequest::get().uri("/api/requests/vehicle/CAB-1111").to_request(),
    )
    .await;
    assert_eq!(exact["success"], true);
    assert_eq!(exact["count"], 1);

    let (_, partial) = call_json(
        &app,
        test::TestRequest::get().uri("/api/requests/vehicle/CAB").to_request(),
    )
    .await;
    assert_eq!(partial["count"], 2);

    let (status, none) = call_json(
        &app,
        test::TestRequest::get().uri("/api/requests/vehicle/NOPE-0").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none["data"], json!([]));
    assert_eq!(none["message"], "No requests found for the specified vehicle number");
}

#[actix_web::test]
async fn missing_and_malformed_ids() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let resp = call(&app, test::TestRequest::get().uri("/api/requests/9999").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "REQUEST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Request not found"),
    )
    .await;

    let resp = call(&app, test::TestRequest::get().uri("/api/requests/abc").to_request()).await;
    assert_problem_details_from_service_response(resp, "INVALID_ID", StatusCode::BAD_REQUEST, None)
        .await;

    let resp = call(
        &app,
        test::TestRequest::get().uri("/api/requests/vehicle/%20").to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_FIELD",
        StatusCode::BAD_REQUEST,
        Some("Vehicle number is required"),
    )
    .await;
}
