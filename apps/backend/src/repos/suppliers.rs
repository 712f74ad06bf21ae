//! Supplier repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::suppliers_sea as suppliers_adapter;
pub use crate::adapters::suppliers_sea::SupplierWrite;
use crate::entities::suppliers;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<suppliers::Model>, DomainError> {
    Ok(suppliers_adapter::list_by_name(conn).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<suppliers::Model, DomainError> {
    suppliers_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Supplier, "Supplier not found"))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SupplierWrite,
) -> Result<suppliers::Model, DomainError> {
    Ok(suppliers_adapter::create(conn, dto).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: SupplierWrite,
) -> Result<suppliers::Model, DomainError> {
    let existing = require(conn, id).await?;
    Ok(suppliers_adapter::update(conn, existing, dto).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    let existing = require(conn, id).await?;
    Ok(suppliers_adapter::delete(conn, existing).await?)
}
