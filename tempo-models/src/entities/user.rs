//! `SeaORM` Entity definition for users

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Timesheets reported by this user
    #[sea_orm(has_many = "super::timesheet::Entity")]
    Timesheets,
}

impl Related<super::timesheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timesheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
