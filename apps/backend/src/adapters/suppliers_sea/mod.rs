//! SeaORM adapter for suppliers.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait, NotSet,
    QueryOrder, Set,
};

use crate::entities::suppliers;

/// Fields written on create and on full update.
#[derive(Debug, Clone)]
pub struct SupplierWrite {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub formsfree_key: String,
}

pub async fn list_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<suppliers::Model>, sea_orm::DbErr> {
    suppliers::Entity::find()
        .order_by_asc(suppliers::Column::Name)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<suppliers::Model>, sea_orm::DbErr> {
    suppliers::Entity::find_by_id(id).one(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SupplierWrite,
) -> Result<suppliers::Model, sea_orm::DbErr> {
    suppliers::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        email: Set(dto.email),
        phone: Set(dto.phone),
        address: Set(dto.address),
        formsfree_key: Set(dto.formsfree_key),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: suppliers::Model,
    dto: SupplierWrite,
) -> Result<suppliers::Model, sea_orm::DbErr> {
    let mut active = existing.into_active_model();
    active.name = Set(dto.name);
    active.email = Set(dto.email);
    active.phone = Set(dto.phone);
    active.address = Set(dto.address);
    active.formsfree_key = Set(dto.formsfree_key);
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: suppliers::Model,
) -> Result<(), sea_orm::DbErr> {
    existing.delete(conn).await?;
    Ok(())
}
