use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::status_migration::normalize_statuses;
use crate::state::app_state::AppState;

/// Echo the caller's local user record.
async fn azure_protected(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Access granted",
        "user": current_user,
    })))
}

async fn migrate_status(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let results = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { normalize_statuses(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Status migration completed successfully",
        "results": results,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/azure-protected").route(web::get().to(azure_protected)));
    cfg.service(web::resource("/migrate-status").route(web::post().to(migrate_status)));
}
