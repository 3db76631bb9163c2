//! Timesheet tracking endpoints

use actix_web::{web, HttpResponse};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tempo_error::{
    web::{FieldErrorMap, WebError},
    WebResult,
};
use tempo_models::{
    domain::prelude::{MessageResponse, NewTimesheet, PathId, TimesheetInfo, UpdateTimesheet},
    entities::prelude::TimesheetActiveModel,
    enums::common::EntityType,
};
use tempo_repository::{ProjectRepository, TimesheetRepository, UserRepository};
use validator::Validate;

pub(super) const ROUTER_PREFIX: &str = "/timesheets";

/// Configure timesheet routes
///
/// # Routes
/// - GET `` : List timesheets with user and project loaded
/// - POST `` : Create a timesheet entry
/// - GET `/{id}`: Retrieve one timesheet with relations
/// - PUT `/{id}`: Partially update a timesheet
/// - DELETE `/{id}`: Delete a timesheet
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete));
}

/// Both foreign keys must reference existing rows; failures are reported as
/// field-level validation errors rather than database errors.
async fn check_references(user_id: Option<i32>, project_id: Option<i32>) -> WebResult<()> {
    let mut errors = FieldErrorMap::new();
    if let Some(user_id) = user_id {
        if !UserRepository::exists_by_id(user_id, None::<&DatabaseConnection>).await? {
            errors.insert(
                "user_id".into(),
                vec!["The selected user_id is invalid.".into()],
            );
        }
    }
    if let Some(project_id) = project_id {
        if !ProjectRepository::exists_by_id(project_id, None::<&DatabaseConnection>).await? {
            errors.insert(
                "project_id".into(),
                vec!["The selected project_id is invalid.".into()],
            );
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(WebError::Validation(errors))
    }
}

async fn list() -> WebResult<HttpResponse> {
    let rows = TimesheetRepository::find_all_with_relations(None::<&DatabaseConnection>).await?;
    let records: Vec<TimesheetInfo> = rows
        .into_iter()
        .map(|(timesheet, user, project)| TimesheetInfo::from_model(timesheet, user, project))
        .collect();
    Ok(HttpResponse::Ok().json(records))
}

async fn create(req: web::Json<NewTimesheet>) -> WebResult<HttpResponse> {
    let body = req.into_inner();
    body.validate()?;
    check_references(body.user_id, body.project_id).await?;

    let created = TimesheetRepository::create(
        TimesheetActiveModel {
            task_name: Set(body.task_name.unwrap()),
            date: Set(body.date.unwrap()),
            hours: Set(body.hours.unwrap()),
            user_id: Set(body.user_id.unwrap()),
            project_id: Set(body.project_id.unwrap()),
            ..Default::default()
        },
        None::<&DatabaseConnection>,
    )
    .await
    .map_err(|e| WebError::persistence("Failed to create timesheet", e))?;

    let (timesheet, user, project) =
        TimesheetRepository::find_with_relations(created.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Timesheet.to_string()))?;
    Ok(HttpResponse::Created().json(TimesheetInfo::from_model(timesheet, user, project)))
}

async fn get_by_id(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    let (timesheet, user, project) =
        TimesheetRepository::find_with_relations(path.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Timesheet.to_string()))?;
    Ok(HttpResponse::Ok().json(TimesheetInfo::from_model(timesheet, user, project)))
}

async fn update(
    path: web::Path<PathId>,
    req: web::Json<UpdateTimesheet>,
) -> WebResult<HttpResponse> {
    // Body shape errors win over a missing target row.
    let body = req.into_inner();
    body.validate()?;
    check_references(body.user_id, body.project_id).await?;

    let existing = TimesheetRepository::find_by_id(path.id, None::<&DatabaseConnection>)
        .await?
        .ok_or_else(|| WebError::NotFound(EntityType::Timesheet.to_string()))?;

    let has_changes = body.task_name.is_some()
        || body.date.is_some()
        || body.hours.is_some()
        || body.user_id.is_some()
        || body.project_id.is_some();

    let mut timesheet = TimesheetActiveModel {
        id: Set(existing.id),
        ..Default::default()
    };
    if let Some(task_name) = body.task_name {
        timesheet.task_name = Set(task_name);
    }
    if let Some(date) = body.date {
        timesheet.date = Set(date);
    }
    if let Some(hours) = body.hours {
        timesheet.hours = Set(hours);
    }
    if let Some(user_id) = body.user_id {
        timesheet.user_id = Set(user_id);
    }
    if let Some(project_id) = body.project_id {
        timesheet.project_id = Set(project_id);
    }

    let updated = if has_changes {
        TimesheetRepository::update(timesheet, None::<&DatabaseConnection>)
            .await
            .map_err(|e| WebError::persistence("Failed to update timesheet", e))?
    } else {
        existing
    };

    let (timesheet, user, project) =
        TimesheetRepository::find_with_relations(updated.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Timesheet.to_string()))?;
    Ok(HttpResponse::Ok().json(TimesheetInfo::from_model(timesheet, user, project)))
}

async fn delete(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    if !TimesheetRepository::exists_by_id(path.id, None::<&DatabaseConnection>).await? {
        return Err(WebError::NotFound(EntityType::Timesheet.to_string()));
    }

    TimesheetRepository::delete(path.id, None::<&DatabaseConnection>)
        .await
        .map_err(|e| WebError::persistence("Failed to delete timesheet", e))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Timesheet deleted successfully")))
}
