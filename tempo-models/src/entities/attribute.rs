//! `SeaORM` Entity definition for attribute schemas

use crate::enums::common::AttributeKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Values assigned under this definition
    #[sea_orm(has_many = "super::attribute_value::Entity")]
    AttributeValues,
}

impl Related<super::attribute_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
