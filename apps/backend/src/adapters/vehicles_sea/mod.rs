//! SeaORM adapter for the vehicle register.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::vehicles;

/// DTO for registering a vehicle.
#[derive(Debug, Clone, Default)]
pub struct VehicleCreate {
    pub vehicle_number: String,
    pub registered_by: Option<i64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<vehicles::Model>, sea_orm::DbErr> {
    vehicles::Entity::find()
        .order_by_asc(vehicles::Column::VehicleNumber)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<vehicles::Model>, sea_orm::DbErr> {
    vehicles::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vehicle_number: &str,
) -> Result<Option<vehicles::Model>, sea_orm::DbErr> {
    vehicles::Entity::find()
        .filter(vehicles::Column::VehicleNumber.eq(vehicle_number))
        .one(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VehicleCreate,
) -> Result<vehicles::Model, sea_orm::DbErr> {
    vehicles::ActiveModel {
        id: NotSet,
        registered_by: Set(dto.registered_by),
        vehicle_number: Set(dto.vehicle_number),
        make: Set(dto.make),
        model: Set(dto.model),
        vehicle_type: Set(dto.vehicle_type),
        status: Set(dto.status),
        cost_centre: Set(dto.cost_centre),
        department: Set(dto.department),
    }
    .insert(conn)
    .await
}
