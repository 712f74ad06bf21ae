use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;
use tracing::warn;

use super::auth_token::AuthToken;
use crate::auth::claims::AzureClaims;
use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The local user behind a verified Azure AD bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub azure_id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "costCentre")]
    pub cost_centre: String,
    pub department: String,
    #[serde(skip)]
    pub claims: AzureClaims,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let mut payload = payload.take();

        Box::pin(async move {
            let token = AuthToken::from_request(&req, &mut payload).await?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(&token.token, app_state.security())?;

            let db = require_db(app_state)?;
            let user = users::find_by_azure_id(db, &claims.oid).await?;
            let Some(user) = user else {
                warn!(oid = %claims.oid, "token is valid but no local user carries its oid");
                return Err(AppError::forbidden_user_not_found());
            };

            Ok(CurrentUser {
                id: user.id,
                azure_id: user.azure_id,
                email: user.email,
                name: user.name.unwrap_or_default(),
                role: user.role.unwrap_or_default(),
                cost_centre: user.cost_centre.unwrap_or_default(),
                department: user.department.unwrap_or_default(),
                claims,
            })
        })
    }
}
