use std::collections::HashSet;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::app::AppConfig;
use crate::trace_ctx::TRACE_HEADER;

/// Origins the frontend may call from.
///
/// Outside production any `http://localhost:<port>` origin is also let
/// through so local frontends on odd ports work.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    listed: HashSet<String>,
    allow_localhost: bool,
}

impl OriginPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            listed: config.cors_origins.iter().cloned().collect(),
            allow_localhost: config.environment != "production",
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        if self.listed.contains(origin) {
            return true;
        }
        self.allow_localhost
            && origin
                .strip_prefix("http://localhost:")
                .is_some_and(|port| port.parse::<u16>().is_ok())
    }
}

pub fn cors_middleware(config: &AppConfig) -> Cors {
    let policy = Arc::new(OriginPolicy::from_config(config));

    Cors::default()
        .allowed_origin_fn(move |origin, _| {
            origin.to_str().is_ok_and(|o| policy.allows(o))
        })
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::HeaderName::from_static(TRACE_HEADER)])
        .supports_credentials()
        .max_age(3600)
}
