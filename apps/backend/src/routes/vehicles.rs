use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PathId, ValidatedJson};
use crate::protocol::catalog::VehicleView;
use crate::repos::vehicles as vehicles_repo;
use crate::services::catalog::VehicleInput;
use crate::state::app_state::AppState;

async fn list_vehicles(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let vehicles = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { vehicles_repo::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let views: Vec<VehicleView> = vehicles.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn create_vehicle(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<VehicleInput>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner().into_create()?;
    let vehicle = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { vehicles_repo::create(txn, dto).await.map_err(AppError::from) })
    })
    .await?;

    info!(vehicle_id = vehicle.id, vehicle_number = %vehicle.vehicle_number, "Vehicle registered");
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": VehicleView::from(vehicle),
    })))
}

async fn get_vehicle(
    req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PathId(id) = id;
    let vehicle = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { vehicles_repo::require(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(VehicleView::from(vehicle)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_vehicles))
            .route(web::post().to(create_vehicle)),
    );
    cfg.service(web::resource("/{id}").route(web::get().to(get_vehicle)));
}
