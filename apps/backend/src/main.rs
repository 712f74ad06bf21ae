use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use tyre_backend::config::app::AppConfig;
use tyre_backend::config::db::DbKind;
use tyre_backend::infra::state::build_state;
use tyre_backend::middleware::cors::cors_middleware;
use tyre_backend::middleware::request_trace::RequestTrace;
use tyre_backend::middleware::structured_logger::StructuredLogger;
use tyre_backend::middleware::trace_span::TraceSpan;
use tyre_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables come from the runtime (docker env_file, systemd,
    // or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid DB_KIND");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;

    let app_state = match build_state()
        .with_config(config)
        .with_db(db_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(?db_kind, "database connected and migrated");
    info!(%host, port, "tyre backend listening");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&data.config))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::route_not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
