//! Claims carried by Azure AD access tokens.

use serde::{Deserialize, Serialize};

/// Subset of an Azure AD v2.0 access token the backend relies on.
///
/// `oid` is the stable object id stored in `users.azure_id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AzureClaims {
    pub oid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
