mod common;
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;
use support::{call, call_json, seed_user, test_app, test_state, RecordingMailer};

#[actix_web::test]
async fn supplier_lifecycle() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/suppliers")
            .set_json(json!({ "name": "Lanka Tyres", "email": "orders@lt.example" }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_FIELD",
        StatusCode::BAD_REQUEST,
        Some("Name, email, and formsfree_key are required"),
    )
    .await;

    for name in ["Zenith Wheels", "Lanka Tyres"] {
        let (status, body) = call_json(
            &app,
            test::TestRequest::post()
                .uri("/api/suppliers")
                .set_json(json!({
                    "name": name,
                    "email": "orders@supplier.example",
                    "phone": "0112345678",
                    "formsfree_key": "mnqwerty",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (_, list) = call_json(&app, test::TestRequest::get().uri("/api/suppliers").to_request()).await;
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Lanka Tyres", "Zenith Wheels"]);
    let id = list[0]["id"].as_i64().unwrap();

    let (status, updated) = call_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/suppliers/{id}"))
            .set_json(json!({
                "name": "Lanka Tyres (Pvt) Ltd",
                "email": "sales@lt.example",
                "formsfree_key": "https://formspree.io/f/abc123",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["name"], "Lanka Tyres (Pvt) Ltd");
    assert!(updated["phone"].is_null());

    let (status, body) = call_json(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/suppliers/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Supplier deleted successfully");

    let resp = call(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/suppliers/{id}"))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "SUPPLIER_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}

#[actix_web::test]
async fn tire_details_catalogue() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    for (size, price) in [("7.50-16", json!(32000)), ("195/65R15", json!("25000"))] {
        let (status, body) = call_json(
            &app,
            test::TestRequest::post()
                .uri("/api/tire-details")
                .set_json(json!({
                    "tire_size": size,
                    "tire_brand": "Bridgestone",
                    "total_price": price,
                    "warranty_distance": 40000,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/tire-details")
            .set_json(json!({ "tire_size": "195/65R15" }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "TIRE_SIZE_EXISTS", StatusCode::CONFLICT, None)
        .await;

    let (_, sizes) = call_json(
        &app,
        test::TestRequest::get().uri("/api/tire-details/sizes").to_request(),
    )
    .await;
    assert_eq!(sizes, json!(["195/65R15", "7.50-16"]));

    let (status, one) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/tire-details/size/195%2F65R15")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{one}");
    assert_eq!(one["total_price"], 25000);
    let id = one["id"].as_i64().unwrap();

    let resp = call(
        &app,
        test::TestRequest::get()
            .uri("/api/tire-details/size/13R22.5")
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "TIRE_DETAILS_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Tire details not found for this size"),
    )
    .await;

    let (status, updated) = call_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/tire-details/{id}"))
            .set_json(json!({ "tire_size": "195/65R15", "tire_brand": "Michelin", "total_price": 27500 }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["tire_brand"], "Michelin");

    let resp = call(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/tire-details/{id}"))
            .set_json(json!({ "tire_size": "7.50-16" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = call(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/tire-details/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = call(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/tire-details/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn vehicle_register() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    let app = test_app(state).await;

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/vehicles")
            .set_json(json!({ "make": "Toyota" }))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_FIELD",
        StatusCode::BAD_REQUEST,
        Some("Vehicle number is required"),
    )
    .await;

    let body = json!({
        "vehicleNumber": "WP CAB-1234",
        "make": "Toyota",
        "model": "HiAce",
        "type": "Van",
        "cost_centre": "CC-100",
        "registeredBy": 4,
    });
    let (status, created) = call_json(
        &app,
        test::TestRequest::post()
            .uri("/api/vehicles")
            .set_json(body.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["vehicleNumber"], "WP CAB-1234");
    assert_eq!(created["data"]["type"], "Van");
    let id = created["data"]["id"].as_i64().unwrap();

    let resp = call(
        &app,
        test::TestRequest::post()
            .uri("/api/vehicles")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(resp, "VEHICLE_EXISTS", StatusCode::CONFLICT, None)
        .await;

    let (status, one) = call_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/vehicles/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["cost_centre"], "CC-100");

    let (_, list) = call_json(&app, test::TestRequest::get().uri("/api/vehicles").to_request()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let resp = call(&app, test::TestRequest::get().uri("/api/vehicles/404").to_request()).await;
    assert_problem_details_from_service_response(resp, "VEHICLE_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}

#[actix_web::test]
async fn users_by_role() {
    let state = test_state(Arc::new(RecordingMailer::default())).await;
    seed_user(&state, "oid-sup-1", "sup1@example.lk", "supervisor").await;
    seed_user(&state, "oid-sup-2", "sup2@example.lk", "supervisor").await;
    seed_user(&state, "oid-co-1", "co1@example.lk", "customer-officer").await;
    seed_user(&state, "oid-eng-1", "eng1@example.lk", "engineer").await;
    let app = test_app(state).await;

    let (_, supervisors) = call_json(
        &app,
        test::TestRequest::get().uri("/api/users/supervisors").to_request(),
    )
    .await;
    let supervisors = supervisors.as_array().unwrap();
    assert_eq!(supervisors.len(), 2);
    assert!(supervisors.iter().all(|u| u["role"] == "supervisor"));

    let (_, officers) = call_json(
        &app,
        test::TestRequest::get()
            .uri("/api/users/customer-officers")
            .to_request(),
    )
    .await;
    assert_eq!(officers.as_array().unwrap().len(), 1);
    assert_eq!(officers[0]["azure_id"], "oid-co-1");
}
