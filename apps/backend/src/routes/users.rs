use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::protocol::catalog::UserView;
use crate::repos::users::{self as users_repo, ROLE_CUSTOMER_OFFICER, ROLE_SUPERVISOR};
use crate::state::app_state::AppState;

async fn users_with_role(
    req: &HttpRequest,
    app_state: &AppState,
    role: &'static str,
) -> Result<HttpResponse, AppError> {
    let users = with_txn(Some(req), app_state, move |txn| {
        Box::pin(async move {
            users_repo::list_with_role(txn, role)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let views: Vec<UserView> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn supervisors(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    users_with_role(&req, &app_state, ROLE_SUPERVISOR).await
}

async fn customer_officers(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    users_with_role(&req, &app_state, ROLE_CUSTOMER_OFFICER).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/supervisors").route(web::get().to(supervisors)));
    cfg.service(web::resource("/customer-officers").route(web::get().to(customer_officers)));
}
