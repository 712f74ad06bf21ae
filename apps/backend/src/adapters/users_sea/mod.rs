//! SeaORM adapter for users.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_azure_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    azure_id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::AzureId.eq(azure_id))
        .one(conn)
        .await
}

pub async fn find_by_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: &str,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .order_by_asc(users::Column::Name)
        .all(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    users::ActiveModel {
        id: NotSet,
        azure_id: Set(dto.azure_id),
        email: Set(dto.email),
        name: Set(dto.name),
        role: Set(dto.role),
        cost_centre: Set(dto.cost_centre),
        department: Set(dto.department),
    }
    .insert(conn)
    .await
}
