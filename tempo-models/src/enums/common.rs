use sea_orm::{DeriveActiveEnum, EnumIter};
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Value type of a dynamic attribute definition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(16))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Text,
    Date,
    Number,
    Select,
}

/// Discriminator for the entity owning an attribute value.
///
/// Replaces a free-form polymorphic type string with a closed enum; adding a
/// new owning entity means adding a variant and its lookup path, not trusting
/// callers to agree on a class name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(32))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Project,
}

/// Entity names used in 404 messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Attribute,
    Project,
    Timesheet,
    User,
}

impl EntityType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attribute => "Attribute",
            Self::Project => "Project",
            Self::Timesheet => "Timesheet",
            Self::User => "User",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}
