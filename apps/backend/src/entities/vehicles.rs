use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "registered_by")]
    pub registered_by: Option<i64>,
    #[sea_orm(column_name = "vehicle_number", unique)]
    pub vehicle_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    #[sea_orm(column_name = "vehicle_type")]
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    #[sea_orm(column_name = "cost_centre")]
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
