//! Vehicle register repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::vehicles_sea as vehicles_adapter;
pub use crate::adapters::vehicles_sea::VehicleCreate;
use crate::entities::vehicles;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<vehicles::Model>, DomainError> {
    Ok(vehicles_adapter::list(conn).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<vehicles::Model, DomainError> {
    vehicles_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Vehicle, "Vehicle not found"))
}

/// Register a vehicle; an existing number is a conflict.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VehicleCreate,
) -> Result<vehicles::Model, DomainError> {
    if vehicles_adapter::find_by_number(conn, &dto.vehicle_number)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(
            ConflictKind::VehicleExists,
            "Vehicle number already exists",
        ));
    }
    Ok(vehicles_adapter::create(conn, dto).await?)
}
