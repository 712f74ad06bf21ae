//! Access log: one `request_completed` event per request.
//!
//! Server errors log at `error`, client errors at `warn`, the rest at
//! `info`. Successful health probes drop to `debug` so uptime checks do
//! not flood the log.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use crate::trace_ctx::{TraceId, NO_TRACE};

const HEALTH_PATH: &str = "/api/health";

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What the access line reports about one request.
struct AccessLine {
    method: String,
    path: String,
    trace_id: String,
    started: Instant,
}

impl AccessLine {
    fn level(&self, status: StatusCode) -> Level {
        if status.is_server_error() {
            Level::ERROR
        } else if status.is_client_error() {
            Level::WARN
        } else if self.path == HEALTH_PATH {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    fn emit(self, status: StatusCode) {
        let level = self.level(status);
        let AccessLine {
            method,
            path,
            trace_id,
            started,
        } = self;
        let duration_ms = started.elapsed().as_millis() as u64;
        let status_code = status.as_u16();
        macro_rules! access {
            ($lvl:expr) => {
                tracing::event!(
                    $lvl,
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    duration_ms,
                    trace_id = %trace_id,
                    "request_completed"
                )
            };
        }
        match level {
            Level::ERROR => access!(Level::ERROR),
            Level::WARN => access!(Level::WARN),
            Level::INFO => access!(Level::INFO),
            _ => access!(Level::DEBUG),
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = AccessLine {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map_or_else(|| NO_TRACE.to_string(), TraceId::to_string),
            started: Instant::now(),
        };
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            line.emit(status);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(path: &str) -> AccessLine {
        AccessLine {
            method: "GET".into(),
            path: path.into(),
            trace_id: NO_TRACE.into(),
            started: Instant::now(),
        }
    }

    #[test]
    fn level_follows_status_class() {
        let l = line("/api/requests");
        assert_eq!(l.level(StatusCode::BAD_GATEWAY), Level::ERROR);
        assert_eq!(l.level(StatusCode::CONFLICT), Level::WARN);
        assert_eq!(l.level(StatusCode::CREATED), Level::INFO);
    }

    #[test]
    fn healthy_probes_are_quiet() {
        let l = line(HEALTH_PATH);
        assert_eq!(l.level(StatusCode::OK), Level::DEBUG);
        assert_eq!(l.level(StatusCode::SERVICE_UNAVAILABLE), Level::ERROR);
    }
}
