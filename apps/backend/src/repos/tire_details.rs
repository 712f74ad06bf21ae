//! Tyre size catalogue repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::tire_details_sea as tire_details_adapter;
pub use crate::adapters::tire_details_sea::TireDetailsWrite;
use crate::entities::tire_details;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::TireDetails, "Tire details not found")
}

fn size_taken() -> DomainError {
    DomainError::conflict(
        ConflictKind::TireSizeExists,
        "Tire details for this size already exist",
    )
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<tire_details::Model>, DomainError> {
    Ok(tire_details_adapter::list(conn).await?)
}

pub async fn sizes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<String>, DomainError> {
    Ok(tire_details_adapter::sizes(conn).await?)
}

pub async fn require_size<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tire_size: &str,
) -> Result<tire_details::Model, DomainError> {
    tire_details_adapter::find_by_size(conn, tire_size)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::TireDetails,
                "Tire details not found for this size",
            )
        })
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TireDetailsWrite,
) -> Result<tire_details::Model, DomainError> {
    if tire_details_adapter::find_by_size(conn, &dto.tire_size)
        .await?
        .is_some()
    {
        return Err(size_taken());
    }
    Ok(tire_details_adapter::create(conn, dto).await?)
}

/// Replace an entry. Renaming onto another entry's size is a conflict.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: TireDetailsWrite,
) -> Result<tire_details::Model, DomainError> {
    let existing = tire_details_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)?;
    if dto.tire_size != existing.tire_size {
        if let Some(other) = tire_details_adapter::find_by_size(conn, &dto.tire_size).await? {
            if other.id != id {
                return Err(size_taken());
            }
        }
    }
    Ok(tire_details_adapter::update(conn, existing, dto).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    let existing = tire_details_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(tire_details_adapter::delete(conn, existing).await?)
}
