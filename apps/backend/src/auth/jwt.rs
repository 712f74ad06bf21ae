use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, EncodingKey, Header};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::AzureClaims;
use crate::state::security_config::{SecurityConfig, VerificationKey};
use crate::AppError;

/// Verify a bearer token and return its claims.
///
/// Errors:
/// - Expired token → `UNAUTHORIZED_EXPIRED_JWT`
/// - Bad signature, issuer, audience or shape → `UNAUTHORIZED_INVALID_JWT`
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AzureClaims, AppError> {
    let key = security.decoding_key()?;

    decode::<AzureClaims>(token, &key, &security.validation())
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(reason = ?e.kind(), "bearer token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
                _ => AppError::unauthorized_invalid_jwt(),
            }
        })
}

/// Mint an HS256 token the way Azure would shape it, valid for `ttl`.
///
/// Only usable with a shared-secret config; local development and tests.
pub fn mint_access_token(
    oid: &str,
    email: &str,
    ttl: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let VerificationKey::Secret(secret) = &security.key else {
        return Err(AppError::config(
            "tokens can only be minted with a shared-secret security config",
        ));
    };

    let exp = (OffsetDateTime::now_utc() + ttl).unix_timestamp();
    let claims = AzureClaims {
        oid: oid.to_string(),
        email: Some(email.to_string()),
        preferred_username: Some(email.to_string()),
        name: None,
        aud: security.audience.clone(),
        iss: security.issuer.clone(),
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}
