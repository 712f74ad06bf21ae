//! Tyre request routes under `/api/requests`.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use time::OffsetDateTime;
use tracing::warn;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{PathId, ValidatedJson};
use crate::protocol::catalog::OrderedFrom;
use crate::protocol::receipts::ReceiptView;
use crate::protocol::requests::{DeletedRequestView, RequestView, RestrictionView};
use crate::repos::requests as requests_repo;
use crate::services::orders::{self, PlaceOrder};
use crate::services::requests::{
    self as requests_service, DeleteActor, NewRequest, RequestPatch, StatusChange,
};
use crate::state::app_state::AppState;

fn views(records: Vec<requests_repo::RequestRecord>) -> Vec<RequestView> {
    records.into_iter().map(RequestView::from).collect()
}

fn vehicle_number(path: web::Path<String>) -> Result<String, AppError> {
    let number = path.into_inner().trim().to_string();
    if number.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::MissingField,
            "Vehicle number is required",
        ));
    }
    Ok(number)
}

async fn create_request(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let now = OffsetDateTime::now_utc();
    let record = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::create_request(txn, input, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(RequestView::from(record)))
}

async fn list_requests(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let records = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { requests_repo::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(views(records)))
}

async fn get_request(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let record = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { requests_repo::load(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RequestView::from(record)))
}

async fn update_request(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<RequestPatch>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let patch = body.into_inner();
    let record = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::update_request(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RequestView::from(record)))
}

async fn update_status(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<StatusChange>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let change = body.into_inner();
    let record = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::change_status(txn, id, change)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request status updated successfully",
        "request": RequestView::from(record),
    })))
}

async fn requests_by_user(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(user_id) = id;
    let records = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_repo::list_by_user(txn, user_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(views(records)))
}

async fn vehicle_restrictions(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let number = vehicle_number(path)?;
    let now = OffsetDateTime::now_utc();
    let lookup = number.clone();
    let eligibility = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::eligibility(txn, &lookup, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RestrictionView::new(&eligibility, &number)))
}

async fn requests_by_vehicle(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let number = vehicle_number(path)?;
    let records = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_repo::find_by_vehicle(txn, &number)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    if records.is_empty() {
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": [],
            "message": "No requests found for the specified vehicle number",
        })));
    }
    let count = records.len();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": views(records),
        "count": count,
    })))
}

async fn place_order(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<PlaceOrder>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let ticket = orders::check_order_fields(body.into_inner())?;
    let base = app_state.config.mailer.formspree_base_url.clone();

    let prepared = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            orders::prepare_order(txn, id, ticket, &base)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    // Nothing is written unless the supplier email went out.
    let email_result = app_state
        .mailer
        .send(&prepared.endpoint, &prepared.supplier.name, &prepared.email)
        .await
        .map_err(|e| {
            warn!(request_id = id, supplier_id = prepared.supplier.id, error = %e, "Order email failed");
            AppError::from(e)
        })?;

    let order = prepared.clone();
    let now = OffsetDateTime::now_utc();
    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            orders::record_order(txn, &order, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Order placed successfully",
        "supplier": OrderedFrom::from(&prepared.supplier),
        "emailResult": email_result,
        "orderNotes": prepared.ticket.notes,
        "receipt": ReceiptView::from(receipt),
    })))
}

async fn delete_request(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<DeleteActor>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let actor = body.into_inner();
    let now = OffsetDateTime::now_utc();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::soft_delete(txn, id, actor, now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request deleted successfully",
        "id": id,
    })))
}

async fn deleted_requests(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let records = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            requests_service::list_deleted(txn, None)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let views: Vec<DeletedRequestView> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn deleted_requests_by_user(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(user_id) = id;
    let records = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::list_deleted(txn, Some(user_id))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let views: Vec<DeletedRequestView> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn restore_request(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let record = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            requests_service::restore(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request restored successfully",
        "request": RequestView::from(record),
    })))
}

async fn backup_count(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (backups, originals) = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { requests_repo::counts(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "backupCount": backups,
        "originalCount": originals,
        "message": format!("{backups} deleted requests in backup, {originals} live requests"),
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_requests))
            .route(web::post().to(create_request)),
    );
    // Literal paths before `/{id}`
    cfg.service(web::resource("/deleted").route(web::get().to(deleted_requests)));
    cfg.service(
        web::resource("/deleted/user/{id}").route(web::get().to(deleted_requests_by_user)),
    );
    cfg.service(web::resource("/user/{id}").route(web::get().to(requests_by_user)));
    cfg.service(
        web::resource("/vehicle/{vehicle_number}/restrictions")
            .route(web::get().to(vehicle_restrictions)),
    );
    cfg.service(
        web::resource("/vehicle/{vehicle_number}").route(web::get().to(requests_by_vehicle)),
    );
    cfg.service(web::resource("/restore/{id}").route(web::post().to(restore_request)));
    cfg.service(web::resource("/test/backup-count").route(web::get().to(backup_count)));
    cfg.service(web::resource("/{id}/status").route(web::put().to(update_status)));
    cfg.service(web::resource("/{id}/place-order").route(web::post().to(place_order)));
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_request))
            .route(web::put().to(update_request))
            .route(web::delete().to(delete_request)),
    );
}
