//! Wraps each request in a `request` span so handler and repository logs
//! carry the trace id, method and path. The response status is recorded
//! on the span once known.
//!
//! Reads the [`TraceId`] that `RequestTrace` stores, so `RequestTrace` must
//! be the outermost `wrap` (actix runs the last registered one first).

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

use crate::trace_ctx::{TraceId, NO_TRACE};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = {
            let ext = req.extensions();
            let trace_id = ext.get::<TraceId>().map_or(NO_TRACE, TraceId::as_str);
            info_span!(
                "request",
                trace_id = %trace_id,
                method = %req.method(),
                path = %req.path(),
                status = field::Empty,
            )
        };
        let recorder = span.clone();
        let fut = self.service.call(req).instrument(span);

        Box::pin(async move {
            let res = fut.await;
            let status = match &res {
                Ok(r) => r.status(),
                Err(e) => e.as_response_error().status_code(),
            };
            recorder.record("status", status.as_u16());
            res
        })
    }
}
