use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::protocol::receipts::{FormattedReceipt, ReceiptView};
use crate::repos::receipts as receipts_repo;
use crate::services::receipts::{self as receipts_service, NewReceipt, ReceiptPatch};
use crate::state::app_state::AppState;

fn views(receipts: Vec<crate::entities::receipts::Model>) -> Vec<ReceiptView> {
    receipts.into_iter().map(ReceiptView::from).collect()
}

async fn create_receipt(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewReceipt>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let now = OffsetDateTime::now_utc();
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            receipts_service::create_receipt(txn, input, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(ReceiptView::from(receipt)))
}

async fn generate_receipt(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(request_id) = id;
    let now = OffsetDateTime::now_utc();
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            receipts_service::generate_for_request(txn, request_id, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(ReceiptView::from(receipt)))
}

async fn list_receipts(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let receipts = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { receipts_repo::list(txn, None).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(views(receipts)))
}

async fn get_receipt(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { receipts_repo::require(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ReceiptView::from(receipt)))
}

async fn receipt_for_order(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            receipts_repo::find_for_order(txn, &key)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(FormattedReceipt::from(receipt)))
}

async fn receipts_by_officer(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(officer_id) = id;
    let receipts = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            receipts_repo::list(txn, Some(officer_id))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(views(receipts)))
}

async fn update_receipt(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ReceiptPatch>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let patch = body.into_inner();
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            receipts_service::update_receipt(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ReceiptView::from(receipt)))
}

async fn delete_receipt(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { receipts_repo::delete(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Receipt deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_receipts))
            .route(web::post().to(create_receipt)),
    );
    cfg.service(web::resource("/generate/{id}").route(web::post().to(generate_receipt)));
    cfg.service(web::resource("/order/{order_id}").route(web::get().to(receipt_for_order)));
    cfg.service(
        web::resource("/customer-officer/{id}").route(web::get().to(receipts_by_officer)),
    );
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_receipt))
            .route(web::put().to(update_receipt))
            .route(web::delete().to(delete_receipt)),
    );
}
