use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Images of a soft-deleted request; `request_id` points into `request_backups`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request_image_backups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "request_id")]
    pub request_id: i64,
    #[sea_orm(column_name = "image_path")]
    pub image_path: String,
    #[sea_orm(column_name = "image_index")]
    pub image_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
