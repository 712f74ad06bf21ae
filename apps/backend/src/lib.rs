#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod mailer;
pub mod middleware;
pub mod protocol;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::AzureClaims;
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use config::app::AppConfig;
pub use config::db::{db_url, DbKind};
pub use error::AppError;
pub use extractors::{AuthToken, CurrentUser, PathId, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::{build_state, StateBuilder};
pub use mailer::{FormspreeMailer, MailReceipt, OrderMailer};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
