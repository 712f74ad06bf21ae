use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "receipt_number", unique)]
    pub receipt_number: String,
    #[sea_orm(column_name = "request_id")]
    pub request_id: i64,
    #[sea_orm(column_name = "order_number")]
    pub order_number: Option<String>,
    #[sea_orm(column_name = "date_generated")]
    pub date_generated: OffsetDateTime,
    #[sea_orm(column_name = "total_amount", column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_name = "customer_officer_id")]
    pub customer_officer_id: Option<i64>,
    #[sea_orm(column_name = "customer_officer_name")]
    pub customer_officer_name: Option<String>,
    #[sea_orm(column_name = "vehicle_number")]
    pub vehicle_number: Option<String>,
    #[sea_orm(column_name = "vehicle_brand")]
    pub vehicle_brand: Option<String>,
    #[sea_orm(column_name = "vehicle_model")]
    pub vehicle_model: Option<String>,
    #[sea_orm(column_name = "supplier_name")]
    pub supplier_name: Option<String>,
    #[sea_orm(column_name = "supplier_email")]
    pub supplier_email: Option<String>,
    #[sea_orm(column_name = "supplier_phone")]
    pub supplier_phone: Option<String>,
    /// JSON array of receipt line items
    #[sea_orm(column_type = "Text")]
    pub items: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_name = "submitted_date")]
    pub submitted_date: Option<OffsetDateTime>,
    #[sea_orm(column_name = "order_placed_date")]
    pub order_placed_date: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
