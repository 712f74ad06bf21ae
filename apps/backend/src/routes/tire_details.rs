use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::protocol::catalog::TireDetailsView;
use crate::repos::tire_details as tire_details_repo;
use crate::services::catalog::TireDetailsInput;
use crate::state::app_state::AppState;

async fn list_tire_details(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rows = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { tire_details_repo::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let views: Vec<TireDetailsView> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn list_sizes(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sizes = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { tire_details_repo::sizes(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(sizes))
}

async fn get_by_size(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let tire_size = path.into_inner();
    let row = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            tire_details_repo::require_size(txn, &tire_size)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TireDetailsView::from(row)))
}

async fn create_tire_details(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<TireDetailsInput>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner().into_write()?;
    let row = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            tire_details_repo::create(txn, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(TireDetailsView::from(row)))
}

async fn update_tire_details(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<TireDetailsInput>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let dto = body.into_inner().into_write()?;
    let row = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            tire_details_repo::update(txn, id, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TireDetailsView::from(row)))
}

async fn delete_tire_details(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            tire_details_repo::delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Tire details deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_tire_details))
            .route(web::post().to(create_tire_details)),
    );
    cfg.service(web::resource("/sizes").route(web::get().to(list_sizes)));
    cfg.service(web::resource("/size/{tire_size}").route(web::get().to(get_by_size)));
    cfg.service(
        web::resource("/{id}")
            .route(web::put().to(update_tire_details))
            .route(web::delete().to(delete_tire_details)),
    );
}
