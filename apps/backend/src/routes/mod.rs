use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod meta;
pub mod receipts;
pub mod requests;
pub mod suppliers;
pub mod tire_details;
pub mod users;
pub mod vehicles;

/// Register every API route. `main.rs` and the integration tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // /api/health, /api/azure-protected, /api/migrate-status
    cfg.service(
        web::scope("/api")
            .configure(health::configure_routes)
            .configure(meta::configure_routes)
            .service(web::scope("/requests").configure(requests::configure_routes))
            .service(web::scope("/receipts").configure(receipts::configure_routes))
            .service(web::scope("/suppliers").configure(suppliers::configure_routes))
            .service(web::scope("/tire-details").configure(tire_details::configure_routes))
            .service(web::scope("/vehicles").configure(vehicles::configure_routes))
            .service(web::scope("/users").configure(users::configure_routes)),
    );
}

/// Fallback for paths no route matched.
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::RouteNotFound,
        format!("Route {} {} not found", req.method(), req.path()),
    ))
}
