//! SeaORM adapter for receipts.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    NotSet, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::receipts;

/// A receipt row about to be written. `items` is the JSON-encoded line item list.
#[derive(Debug, Clone)]
pub struct ReceiptCreate {
    pub receipt_number: String,
    pub request_id: i64,
    pub order_number: Option<String>,
    pub date_generated: OffsetDateTime,
    pub total_amount: Decimal,
    pub customer_officer_id: Option<i64>,
    pub customer_officer_name: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub items: String,
    pub notes: Option<String>,
    pub submitted_date: Option<OffsetDateTime>,
    pub order_placed_date: Option<OffsetDateTime>,
}

/// Partial update; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct ReceiptUpdate {
    pub order_number: Option<Option<String>>,
    pub total_amount: Option<Decimal>,
    pub customer_officer_name: Option<Option<String>>,
    pub vehicle_number: Option<Option<String>>,
    pub vehicle_brand: Option<Option<String>>,
    pub vehicle_model: Option<Option<String>>,
    pub supplier_name: Option<Option<String>>,
    pub supplier_email: Option<Option<String>>,
    pub supplier_phone: Option<Option<String>>,
    pub items: Option<String>,
    pub notes: Option<Option<String>>,
}

pub async fn exists_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    receipt_number: &str,
) -> Result<bool, sea_orm::DbErr> {
    Ok(receipts::Entity::find()
        .filter(receipts::Column::ReceiptNumber.eq(receipt_number))
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReceiptCreate,
) -> Result<receipts::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    receipts::ActiveModel {
        id: NotSet,
        receipt_number: Set(dto.receipt_number),
        request_id: Set(dto.request_id),
        order_number: Set(dto.order_number),
        date_generated: Set(dto.date_generated),
        total_amount: Set(dto.total_amount),
        customer_officer_id: Set(dto.customer_officer_id),
        customer_officer_name: Set(dto.customer_officer_name),
        vehicle_number: Set(dto.vehicle_number),
        vehicle_brand: Set(dto.vehicle_brand),
        vehicle_model: Set(dto.vehicle_model),
        supplier_name: Set(dto.supplier_name),
        supplier_email: Set(dto.supplier_email),
        supplier_phone: Set(dto.supplier_phone),
        items: Set(dto.items),
        notes: Set(dto.notes),
        submitted_date: Set(dto.submitted_date),
        order_placed_date: Set(dto.order_placed_date),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<receipts::Model>, sea_orm::DbErr> {
    receipts::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_order_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_number: &str,
) -> Result<Option<receipts::Model>, sea_orm::DbErr> {
    receipts::Entity::find()
        .filter(receipts::Column::OrderNumber.eq(order_number))
        .order_by_desc(receipts::Column::DateGenerated)
        .one(conn)
        .await
}

pub async fn find_by_request_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request_id: i64,
) -> Result<Option<receipts::Model>, sea_orm::DbErr> {
    receipts::Entity::find()
        .filter(receipts::Column::RequestId.eq(request_id))
        .order_by_desc(receipts::Column::DateGenerated)
        .one(conn)
        .await
}

/// Receipts newest first, optionally only one customer officer's.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_officer_id: Option<i64>,
) -> Result<Vec<receipts::Model>, sea_orm::DbErr> {
    let mut query = receipts::Entity::find();
    if let Some(officer) = customer_officer_id {
        query = query.filter(receipts::Column::CustomerOfficerId.eq(officer));
    }
    query
        .order_by_desc(receipts::Column::DateGenerated)
        .order_by_desc(receipts::Column::Id)
        .all(conn)
        .await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: receipts::Model,
    dto: ReceiptUpdate,
) -> Result<receipts::Model, sea_orm::DbErr> {
    let mut a = existing.into_active_model();

    macro_rules! apply {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = dto.$field { a.$field = Set(v); })*
        };
    }
    apply!(
        order_number,
        total_amount,
        customer_officer_name,
        vehicle_number,
        vehicle_brand,
        vehicle_model,
        supplier_name,
        supplier_email,
        supplier_phone,
        items,
        notes,
    );
    a.updated_at = Set(OffsetDateTime::now_utc());

    a.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: receipts::Model,
) -> Result<(), sea_orm::DbErr> {
    existing.delete(conn).await?;
    Ok(())
}
