//! Timesheet request/response shapes.

use super::project::ProjectSummary;
use super::user::UserInfo;
use crate::entities::prelude::{ProjectModel, TimesheetModel, UserModel};
use chrono::NaiveDate;
use sea_orm::entity::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /timesheets`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTimesheet {
    #[validate(
        required(message = "The task_name field is required."),
        length(max = 255, message = "The task_name may not be greater than 255 characters.")
    )]
    pub task_name: Option<String>,
    #[validate(required(message = "The date field is required."))]
    pub date: Option<NaiveDate>,
    #[validate(
        required(message = "The hours field is required."),
        range(min = 0.0, message = "The hours must be at least 0.")
    )]
    pub hours: Option<f64>,
    #[validate(required(message = "The user_id field is required."))]
    pub user_id: Option<i32>,
    #[validate(required(message = "The project_id field is required."))]
    pub project_id: Option<i32>,
}

/// Body of `PUT /timesheets/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTimesheet {
    #[validate(length(max = 255, message = "The task_name may not be greater than 255 characters."))]
    pub task_name: Option<String>,
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "The hours must be at least 0."))]
    pub hours: Option<f64>,
    pub user_id: Option<i32>,
    pub project_id: Option<i32>,
}

/// Timesheet record with its reporting user and project loaded.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetInfo {
    pub id: i32,
    pub task_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub user_id: i32,
    pub project_id: i32,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummary>,
}

impl TimesheetInfo {
    pub fn from_model(
        m: TimesheetModel,
        user: Option<UserModel>,
        project: Option<ProjectModel>,
    ) -> Self {
        Self {
            id: m.id,
            task_name: m.task_name,
            date: m.date,
            hours: m.hours,
            user_id: m.user_id,
            project_id: m.project_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
            user: user.map(UserInfo::from),
            project: project.map(ProjectSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_all_fields() {
        let body: NewTimesheet = serde_json::from_str("{}").unwrap();
        let errs = body.validate().unwrap_err();
        for field in ["task_name", "date", "hours", "user_id", "project_id"] {
            assert!(errs.field_errors().contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn negative_hours_rejected() {
        let body: NewTimesheet = serde_json::from_str(
            r#"{"task_name":"Review","date":"2024-03-01","hours":-1.5,"user_id":1,"project_id":1}"#,
        )
        .unwrap();
        let errs = body.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("hours"));
    }

    #[test]
    fn update_accepts_partial_body() {
        let body: UpdateTimesheet = serde_json::from_str(r#"{"hours":7.5}"#).unwrap();
        assert!(body.validate().is_ok());
    }
}
