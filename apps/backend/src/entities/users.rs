use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Azure AD object id (`oid` claim)
    #[sea_orm(column_name = "azure_id", unique)]
    pub azure_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    #[sea_orm(column_name = "cost_centre")]
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
