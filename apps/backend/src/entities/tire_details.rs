use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tire_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "tire_size", unique)]
    pub tire_size: String,
    #[sea_orm(column_name = "tire_brand", column_type = "Text", nullable)]
    pub tire_brand: Option<String>,
    #[sea_orm(column_name = "total_price")]
    pub total_price: Option<i32>,
    #[sea_orm(column_name = "warranty_distance")]
    pub warranty_distance: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
