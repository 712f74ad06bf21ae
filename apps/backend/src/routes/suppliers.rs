use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::protocol::catalog::SupplierView;
use crate::repos::suppliers as suppliers_repo;
use crate::services::catalog::SupplierInput;
use crate::state::app_state::AppState;

async fn list_suppliers(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let suppliers = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { suppliers_repo::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let views: Vec<SupplierView> = suppliers.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn get_supplier(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let supplier = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { suppliers_repo::require(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(SupplierView::from(supplier)))
}

async fn create_supplier(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<SupplierInput>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner().into_write()?;
    let supplier = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { suppliers_repo::create(txn, dto).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Created().json(SupplierView::from(supplier)))
}

async fn update_supplier(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<SupplierInput>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let dto = body.into_inner().into_write()?;
    let supplier = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            suppliers_repo::update(txn, id, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(SupplierView::from(supplier)))
}

async fn delete_supplier(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { suppliers_repo::delete(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Supplier deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_suppliers))
            .route(web::post().to(create_supplier)),
    );
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_supplier))
            .route(web::put().to(update_supplier))
            .route(web::delete().to(delete_supplier)),
    );
}
