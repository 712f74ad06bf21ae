use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// JSON body whose decode failures become 400 `BAD_REQUEST` problems.
///
/// A blank body reads as `{}`, so bodies made only of optional fields (the
/// soft-delete actor, for one) may be omitted entirely.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

async fn collect_body(mut payload: Payload) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "request body stream failed");
            AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
        })?;
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %Redacted(&e.to_string()), body_size = body.len(), "JSON body rejected");
        AppError::bad_request(ErrorCode::BadRequest, describe(&e))
    })
}

/// Client-facing summary of a decode error. Field-level messages keep the
/// field name but drop the echoed value.
fn describe(e: &serde_json::Error) -> String {
    match e.classify() {
        Category::Syntax => format!(
            "Invalid JSON at line {} column {}",
            e.line(),
            e.column()
        ),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => {
            let msg = e.to_string();
            match msg.split_once(" at line ") {
                Some((head, _)) if head.starts_with("missing field") => {
                    format!("Invalid request body: {head}")
                }
                _ => "Invalid request body: wrong type for one or more fields".to_string(),
            }
        }
        Category::Io => "Failed to read request body".to_string(),
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();
        Box::pin(async move {
            let body = collect_body(payload).await?;
            decode(&body).map(ValidatedJson)
        })
    }
}
