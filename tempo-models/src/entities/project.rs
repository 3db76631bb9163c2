//! `SeaORM` Entity definition for projects

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub status: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Dynamic attribute values owned by this project
    #[sea_orm(has_many = "super::attribute_value::Entity")]
    AttributeValues,
    /// Timesheets booked against this project
    #[sea_orm(has_many = "super::timesheet::Entity")]
    Timesheets,
}

impl Related<super::attribute_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeValues.def()
    }
}

impl Related<super::timesheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timesheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
