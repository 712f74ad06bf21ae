use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::AppError;

/// Raw bearer token from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    /// Parse `Bearer <token>`. The scheme is matched case-insensitively.
    pub fn parse(header_value: &str) -> Result<Self, AppError> {
        let mut parts = header_value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(AuthToken {
                    token: token.to_string(),
                })
            }
            _ => Err(AppError::unauthorized_missing_bearer()),
        }
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::unauthorized_missing_bearer)
            .and_then(AuthToken::parse);
        ready(result)
    }
}
