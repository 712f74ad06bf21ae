//! Build the real app over a migrated in-memory SQLite database.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use serde_json::Value;
use tyre_backend::config::app::AppConfig;
use tyre_backend::config::db::DbKind;
use tyre_backend::infra::state::build_state;
use tyre_backend::mailer::OrderMailer;
use tyre_backend::middleware::request_trace::RequestTrace;
use tyre_backend::middleware::structured_logger::StructuredLogger;
use tyre_backend::middleware::trace_span::TraceSpan;
use tyre_backend::routes;
use tyre_backend::state::app_state::AppState;
use tyre_backend::state::security_config::SecurityConfig;

use super::mailer::RecordingMailer;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Fresh database per call; each test gets its own schema.
pub async fn test_state(mailer: Arc<RecordingMailer>) -> AppState {
    let config = AppConfig {
        environment: "test".to_string(),
        security: SecurityConfig::hs256(TEST_SECRET),
        ..AppConfig::default()
    };
    build_state()
        .with_config(config)
        .with_mailer(mailer as Arc<dyn OrderMailer>)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
        .expect("build test state")
}

pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            .default_service(web::to(routes::route_not_found)),
    )
    .await
}

pub async fn call<S>(app: &S, req: Request) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    test::call_service(app, req).await
}

/// Call and parse the JSON body, whatever the status.
pub async fn call_json<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
