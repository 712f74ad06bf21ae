//! User repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
pub use crate::adapters::users_sea::UserCreate;
use crate::entities::users;
use crate::errors::domain::DomainError;

pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_CUSTOMER_OFFICER: &str = "customer-officer";

pub async fn find_by_azure_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    azure_id: &str,
) -> Result<Option<users::Model>, DomainError> {
    Ok(users_adapter::find_by_azure_id(conn, azure_id).await?)
}

pub async fn list_with_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: &str,
) -> Result<Vec<users::Model>, DomainError> {
    Ok(users_adapter::find_by_role(conn, role).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, DomainError> {
    Ok(users_adapter::create_user(conn, dto).await?)
}
