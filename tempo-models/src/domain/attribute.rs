//! Attribute request/response shapes.

use crate::entities::prelude::{AttributeModel, AttributeValueModel};
use crate::enums::common::{AttributeKind, OwnerKind};
use sea_orm::{entity::prelude::DateTimeUtc, ActiveEnum};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Parse a client-submitted type token (`text | date | number | select`).
pub fn parse_kind(raw: &str) -> Option<AttributeKind> {
    AttributeKind::try_from_value(&raw.to_owned()).ok()
}

fn validate_kind(raw: &str) -> Result<(), ValidationError> {
    match parse_kind(raw) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("in")),
    }
}

/// Body of `POST /attributes`. The type arrives as a raw string so an unknown
/// token surfaces as a field error instead of failing body deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAttribute {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(
        required(message = "The type field is required."),
        custom(function = validate_kind, message = "The selected type is invalid.")
    )]
    pub kind: Option<String>,
}

/// Body of `PUT /attributes/{id}`. The type is mandatory on update even
/// though the name is not.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAttribute {
    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(
        required(message = "The type field is required."),
        custom(function = validate_kind, message = "The selected type is invalid.")
    )]
    pub kind: Option<String>,
}

/// Attribute record as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<AttributeModel> for AttributeInfo {
    fn from(m: AttributeModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            kind: m.kind,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Attribute with the values currently assigned to owning entities.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeWithValues {
    #[serde(flatten)]
    pub attribute: AttributeInfo,
    pub values: Vec<AttributeValueInfo>,
}

/// One value row, optionally carrying its attribute definition when the
/// caller asked for it to be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeValueInfo {
    pub id: i32,
    pub attribute_id: i32,
    pub entity_id: i32,
    pub entity_type: OwnerKind,
    pub value: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributeInfo>,
}

impl AttributeValueInfo {
    pub fn from_model(m: AttributeValueModel, attribute: Option<AttributeModel>) -> Self {
        Self {
            id: m.id,
            attribute_id: m.attribute_id,
            entity_id: m.entity_id,
            entity_type: m.entity_type,
            value: m.value,
            created_at: m.created_at,
            updated_at: m.updated_at,
            attribute: attribute.map(AttributeInfo::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_requires_name_and_type() {
        let body: NewAttribute = serde_json::from_str("{}").unwrap();
        let errs = body.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
        assert!(errs.field_errors().contains_key("kind"));
    }

    #[test]
    fn update_requires_type_but_not_name() {
        let body: UpdateAttribute = serde_json::from_str(r#"{"name":"department"}"#).unwrap();
        let errs = body.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("kind"));
        assert!(!errs.field_errors().contains_key("name"));
    }

    #[test]
    fn kind_accepts_known_type_token() {
        let body: NewAttribute =
            serde_json::from_str(r#"{"name":"start_date","type":"date"}"#).unwrap();
        assert!(body.validate().is_ok());
        assert_eq!(
            body.kind.as_deref().and_then(parse_kind),
            Some(AttributeKind::Date)
        );
    }

    #[test]
    fn unknown_type_is_a_field_error() {
        let body: NewAttribute =
            serde_json::from_str(r#"{"name":"department","type":"bogus"}"#).unwrap();
        let errs = body.validate().unwrap_err();
        let fields = errs.field_errors();
        assert_eq!(
            fields["kind"][0].message.as_deref(),
            Some("The selected type is invalid.")
        );
    }
}
