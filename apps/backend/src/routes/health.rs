use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::domain::eligibility::format_timestamp;
use crate::error::AppError;
use crate::infra::db::{latest_migration, ping};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    timestamp: String,
    environment: String,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (db, db_error, migrations) = match require_db(&app_state) {
        Ok(conn) => match ping(conn).await {
            Ok(()) => {
                let migrations = match latest_migration(conn).await {
                    Ok(Some(version)) => version,
                    Ok(None) => "no_migrations".to_string(),
                    Err(_) => "unknown".to_string(),
                };
                ("ok", None, migrations)
            }
            Err(e) => ("error", Some(format!("DB query failed: {e}")), "unknown".to_string()),
        },
        Err(e) => ("error", Some(format!("DB unavailable: {e}")), "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "OK",
        message: "Tire management API is running",
        timestamp: format_timestamp(OffsetDateTime::now_utc()),
        environment: app_state.config.environment.clone(),
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)));
}
