//! Project request/response shapes.

use super::attribute::AttributeValueInfo;
use crate::entities::prelude::{AttributeModel, AttributeValueModel, ProjectModel};
use sea_orm::entity::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One dynamic attribute assignment submitted with a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeEntry {
    #[validate(required(message = "The attribute_id field is required."))]
    pub attribute_id: Option<i32>,
    #[validate(
        required(message = "The value field is required."),
        length(min = 1, message = "The value field is required.")
    )]
    pub value: Option<String>,
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProject {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "The status field is required."),
        length(max = 255, message = "The status may not be greater than 255 characters.")
    )]
    pub status: Option<String>,
    #[validate(nested)]
    pub attributes: Option<Vec<AttributeEntry>>,
}

/// Body of `PUT /projects/{id}`. Omitted fields keep their stored value;
/// submitted attribute entries are upserted against the existing set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "The status may not be greater than 255 characters."))]
    pub status: Option<String>,
    #[validate(nested)]
    pub attributes: Option<Vec<AttributeEntry>>,
}

/// Project record with its dynamic attribute values.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    pub attribute_values: Vec<AttributeValueInfo>,
}

impl ProjectInfo {
    pub fn from_model(
        project: ProjectModel,
        values: Vec<(AttributeValueModel, Option<AttributeModel>)>,
    ) -> Self {
        Self {
            id: project.id,
            name: project.name,
            status: project.status,
            created_at: project.created_at,
            updated_at: project.updated_at,
            attribute_values: values
                .into_iter()
                .map(|(value, attribute)| AttributeValueInfo::from_model(value, attribute))
                .collect(),
        }
    }
}

/// Bare project record, used when nested inside other resources.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<ProjectModel> for ProjectSummary {
    fn from(m: ProjectModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_status() {
        let body: NewProject = serde_json::from_str(r#"{"attributes":[]}"#).unwrap();
        let errs = body.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
        assert!(errs.field_errors().contains_key("status"));
    }

    #[test]
    fn nested_attribute_entries_are_validated() {
        let body: NewProject = serde_json::from_str(
            r#"{"name":"Apollo","status":"active","attributes":[{"attribute_id":1,"value":"HR"},{"value":""}]}"#,
        )
        .unwrap();
        let errs = body.validate().unwrap_err();
        let errors = errs.errors();
        assert!(errors.contains_key("attributes"));
    }

    #[test]
    fn update_accepts_partial_body() {
        let body: UpdateProject = serde_json::from_str(r#"{"status":"archived"}"#).unwrap();
        assert!(body.validate().is_ok());
        assert!(body.name.is_none());
    }
}
