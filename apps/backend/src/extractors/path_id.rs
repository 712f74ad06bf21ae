use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive numeric `{id}` segment of the matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl PathId {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw.ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter")
        })?;
        let id = raw.trim().parse::<i64>().map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}"))
        })?;
        if id <= 0 {
            return Err(AppError::bad_request(
                ErrorCode::InvalidId,
                format!("Id must be positive, got: {id}"),
            ));
        }
        Ok(PathId(id))
    }
}

impl FromRequest for PathId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req.match_info().get("id")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_ids() {
        assert_eq!(PathId::parse(Some("42")).unwrap(), PathId(42));
    }

    #[test]
    fn rejects_bad_ids() {
        for raw in [None, Some("abc"), Some("0"), Some("-3"), Some("")] {
            let err = PathId::parse(raw).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidId);
        }
    }
}
