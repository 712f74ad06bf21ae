use std::env;
use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tracing::warn;

use crate::error::AppError;

/// Key material used to verify bearer tokens
#[derive(Clone)]
pub enum VerificationKey {
    /// Shared HMAC secret (HS256)
    Secret(Vec<u8>),
    /// PEM-encoded RSA public key (RS256)
    RsaPem(Vec<u8>),
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationKey::Secret(_) => f.write_str("Secret(..)"),
            VerificationKey::RsaPem(_) => f.write_str("RsaPem(..)"),
        }
    }
}

/// Configuration for JWT verification
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub key: VerificationKey,
    pub algorithm: Algorithm,
    /// Expected `iss`; unchecked when `None`
    pub issuer: Option<String>,
    /// Expected `aud`; unchecked when `None`
    pub audience: Option<String>,
}

impl SecurityConfig {
    /// HS256 verification with no issuer or audience pinning.
    pub fn hs256(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: VerificationKey::Secret(secret.into()),
            algorithm: Algorithm::HS256,
            issuer: None,
            audience: None,
        }
    }

    /// RS256 verification against an Azure AD signing key.
    pub fn rs256_pem(
        pem: impl Into<Vec<u8>>,
        issuer: Option<String>,
        audience: Option<String>,
    ) -> Self {
        Self {
            key: VerificationKey::RsaPem(pem.into()),
            algorithm: Algorithm::RS256,
            issuer,
            audience,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Build from `AZURE_JWT_PUBLIC_KEY_PEM` (RS256) or `AUTH_JWT_SECRET` (HS256).
    ///
    /// `AZURE_TENANT_ID` pins the v2.0 issuer and `AZURE_CLIENT_ID` the audience.
    /// With neither key set, a random secret is used so every token is rejected.
    pub fn from_env() -> Result<Self, AppError> {
        let issuer = non_blank("AZURE_TENANT_ID")
            .map(|tenant| format!("https://login.microsoftonline.com/{tenant}/v2.0"));
        let audience = non_blank("AZURE_CLIENT_ID");

        if let Some(pem) = non_blank("AZURE_JWT_PUBLIC_KEY_PEM") {
            // PEMs passed through env files often carry literal `\n`
            let pem = pem.replace("\\n", "\n");
            DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                AppError::config(format!("AZURE_JWT_PUBLIC_KEY_PEM is not a valid RSA key: {e}"))
            })?;
            return Ok(Self::rs256_pem(pem.into_bytes(), issuer, audience));
        }

        if let Some(secret) = non_blank("AUTH_JWT_SECRET") {
            return Ok(Self {
                issuer,
                audience,
                ..Self::hs256(secret.into_bytes())
            });
        }

        warn!("No JWT verification key configured; protected routes will reject every token");
        Ok(Self::default())
    }

    pub fn decoding_key(&self) -> Result<DecodingKey, AppError> {
        match &self.key {
            VerificationKey::Secret(secret) => Ok(DecodingKey::from_secret(secret)),
            VerificationKey::RsaPem(pem) => DecodingKey::from_rsa_pem(pem)
                .map_err(|e| AppError::config(format!("invalid RSA verification key: {e}"))),
        }
    }

    /// Validation rules pinned to the configured algorithm, issuer and audience.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        if let Some(iss) = &self.issuer {
            validation.set_issuer(&[iss.as_str()]);
        }
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud.as_str()]),
            None => validation.validate_aud = false,
        }
        validation
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::hs256(uuid::Uuid::new_v4().as_bytes().to_vec())
    }
}

fn non_blank(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
