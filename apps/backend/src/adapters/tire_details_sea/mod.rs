//! SeaORM adapter for the tyre size catalogue.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::tire_details;

#[derive(Debug, Clone)]
pub struct TireDetailsWrite {
    pub tire_size: String,
    pub tire_brand: Option<String>,
    pub total_price: Option<i32>,
    pub warranty_distance: Option<i32>,
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<tire_details::Model>, sea_orm::DbErr> {
    tire_details::Entity::find()
        .order_by_asc(tire_details::Column::TireSize)
        .all(conn)
        .await
}

pub async fn sizes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<String>, sea_orm::DbErr> {
    tire_details::Entity::find()
        .select_only()
        .column(tire_details::Column::TireSize)
        .order_by_asc(tire_details::Column::TireSize)
        .into_tuple::<String>()
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<tire_details::Model>, sea_orm::DbErr> {
    tire_details::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_size<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tire_size: &str,
) -> Result<Option<tire_details::Model>, sea_orm::DbErr> {
    tire_details::Entity::find()
        .filter(tire_details::Column::TireSize.eq(tire_size))
        .one(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TireDetailsWrite,
) -> Result<tire_details::Model, sea_orm::DbErr> {
    tire_details::ActiveModel {
        id: NotSet,
        tire_size: Set(dto.tire_size),
        tire_brand: Set(dto.tire_brand),
        total_price: Set(dto.total_price),
        warranty_distance: Set(dto.warranty_distance),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: tire_details::Model,
    dto: TireDetailsWrite,
) -> Result<tire_details::Model, sea_orm::DbErr> {
    let mut active = existing.into_active_model();
    active.tire_size = Set(dto.tire_size);
    active.tire_brand = Set(dto.tire_brand);
    active.total_price = Set(dto.total_price);
    active.warranty_distance = Set(dto.warranty_distance);
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: tire_details::Model,
) -> Result<(), sea_orm::DbErr> {
    existing.delete(conn).await?;
    Ok(())
}
