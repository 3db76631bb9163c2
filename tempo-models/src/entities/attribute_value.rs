//! `SeaORM` Entity definition for polymorphic attribute values
//!
//! One row assigns one attribute to one owning entity. The owning side is a
//! typed `(entity_type, entity_id)` pair; the only owner today is `project`.
//! Uniqueness of `(attribute_id, entity_id, entity_type)` is enforced by a
//! database index, not application bookkeeping.

use crate::enums::common::OwnerKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute_value")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,
    pub attribute_id: i32,
    pub entity_id: i32,
    pub entity_type: OwnerKind,
    pub value: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to an attribute definition
    #[sea_orm(
        belongs_to = "super::attribute::Entity",
        from = "Column::AttributeId",
        to = "super::attribute::Column::Id"
    )]
    Attribute,
    /// Owning project when `entity_type` is `project`
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::EntityId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attribute.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
