use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "vehicle_id")]
    pub vehicle_id: i64,
    #[sea_orm(column_name = "vehicle_number")]
    pub vehicle_number: String,
    pub quantity: i32,
    #[sea_orm(column_name = "tubes_quantity")]
    pub tubes_quantity: i32,
    #[sea_orm(column_name = "tire_size")]
    pub tire_size: String,
    #[sea_orm(column_name = "request_reason", column_type = "Text")]
    pub request_reason: String,
    #[sea_orm(column_name = "requester_name")]
    pub requester_name: String,
    #[sea_orm(column_name = "requester_email")]
    pub requester_email: String,
    #[sea_orm(column_name = "requester_phone")]
    pub requester_phone: String,
    #[sea_orm(column_name = "vehicle_brand")]
    pub vehicle_brand: String,
    #[sea_orm(column_name = "vehicle_model")]
    pub vehicle_model: String,
    #[sea_orm(column_name = "last_replacement_date")]
    pub last_replacement_date: Date,
    #[sea_orm(column_name = "existing_tire_make")]
    pub existing_tire_make: String,
    #[sea_orm(column_name = "tire_size_required")]
    pub tire_size_required: String,
    #[sea_orm(column_name = "present_km_reading")]
    pub present_km_reading: i32,
    #[sea_orm(column_name = "previous_km_reading")]
    pub previous_km_reading: i32,
    #[sea_orm(column_name = "tire_wear_pattern")]
    pub tire_wear_pattern: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub status: String,
    #[sea_orm(column_name = "submitted_at")]
    pub submitted_at: OffsetDateTime,
    #[sea_orm(column_name = "supervisor_notes", column_type = "Text", nullable)]
    pub supervisor_notes: Option<String>,
    #[sea_orm(column_name = "technical_manager_note", column_type = "Text", nullable)]
    pub technical_manager_note: Option<String>,
    #[sea_orm(column_name = "engineer_note", column_type = "Text", nullable)]
    pub engineer_note: Option<String>,
    #[sea_orm(column_name = "customer_officer_note", column_type = "Text", nullable)]
    pub customer_officer_note: Option<String>,
    #[sea_orm(column_name = "supervisor_id")]
    pub supervisor_id: Option<i64>,
    #[sea_orm(column_name = "technical_manager_id")]
    pub technical_manager_id: Option<i64>,
    #[sea_orm(column_name = "supervisor_decision_by")]
    pub supervisor_decision_by: Option<i64>,
    #[sea_orm(column_name = "engineer_decision_by")]
    pub engineer_decision_by: Option<i64>,
    #[sea_orm(column_name = "customer_officer_decision_by")]
    pub customer_officer_decision_by: Option<i64>,
    #[sea_orm(column_name = "delivery_office_name")]
    pub delivery_office_name: Option<String>,
    #[sea_orm(column_name = "delivery_street_name")]
    pub delivery_street_name: Option<String>,
    #[sea_orm(column_name = "delivery_town")]
    pub delivery_town: Option<String>,
    #[sea_orm(column_name = "total_price", column_type = "Decimal(Some((10, 2)))", nullable)]
    pub total_price: Option<Decimal>,
    #[sea_orm(column_name = "warranty_distance")]
    pub warranty_distance: Option<i32>,
    #[sea_orm(column_name = "tire_wear_indicator_appeared")]
    pub tire_wear_indicator_appeared: Option<bool>,
    /// Requester's section; stored in the `department` column
    #[sea_orm(column_name = "department")]
    pub user_section: Option<String>,
    #[sea_orm(column_name = "cost_center")]
    pub cost_center: Option<String>,
    #[sea_orm(column_name = "supplier_name")]
    pub supplier_name: Option<String>,
    #[sea_orm(column_name = "supplier_email")]
    pub supplier_email: Option<String>,
    #[sea_orm(column_name = "supplier_phone")]
    pub supplier_phone: Option<String>,
    #[sea_orm(column_name = "order_number")]
    pub order_number: Option<String>,
    #[sea_orm(column_name = "order_notes", column_type = "Text", nullable)]
    pub order_notes: Option<String>,
    #[sea_orm(column_name = "order_placed_date")]
    pub order_placed_date: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::request_images::Entity")]
    RequestImages,
}

impl Related<super::request_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
