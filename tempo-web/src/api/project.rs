//! Project management endpoints with dynamic attribute filtering

use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;
use tempo_error::{
    web::{FieldErrorMap, WebError},
    WebResult,
};
use tempo_models::{
    domain::prelude::{
        AttributeEntry, MessageResponse, NewProject, PathId, ProjectInfo, ProjectListParams,
        UpdateProject,
    },
    enums::common::EntityType,
};
use tempo_repository::{AttributeRepository, ProjectRepository};
use validator::Validate;

pub(super) const ROUTER_PREFIX: &str = "/projects";

/// Configure project routes
///
/// # Routes
/// - GET `` : List projects, optionally filtered on base or attribute fields
/// - POST `` : Create a project with attribute value entries
/// - GET `/{id}`: Retrieve one project with its attribute values
/// - PUT `/{id}`: Partially update base fields and upsert attribute entries
/// - DELETE `/{id}`: Delete a project and its owned values
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete));
}

/// Parse `filters[field][operator]=..&filters[field][value]=..` pairs.
/// Unknown operators fail here, before any query is built.
fn parse_filters(req: &HttpRequest) -> Result<ProjectListParams, WebError> {
    serde_qs::Config::new(5, false)
        .deserialize_str(req.query_string())
        .map_err(|e| WebError::BadRequest(e.to_string()))
}

/// Every submitted attribute_id must reference an existing attribute;
/// unknown ids are reported per entry (`attributes.0.attribute_id`).
async fn check_attribute_ids(entries: &[AttributeEntry]) -> WebResult<()> {
    let ids: Vec<i32> = entries.iter().filter_map(|e| e.attribute_id).collect();
    if ids.is_empty() {
        return Ok(());
    }
    let existing =
        AttributeRepository::find_existing_ids(ids, None::<&DatabaseConnection>).await?;

    let mut errors = FieldErrorMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(id) = entry.attribute_id {
            if !existing.contains(&id) {
                errors.insert(
                    format!("attributes.{index}.attribute_id"),
                    vec![format!(
                        "The selected attributes.{index}.attribute_id is invalid."
                    )],
                );
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(WebError::Validation(errors))
    }
}

fn into_entries(entries: Vec<AttributeEntry>) -> Vec<(i32, String)> {
    entries
        .into_iter()
        .filter_map(|entry| Some((entry.attribute_id?, entry.value?)))
        .collect()
}

async fn list(req: HttpRequest) -> WebResult<HttpResponse> {
    let params = parse_filters(&req)?;
    let projects = ProjectRepository::find_filtered(&params, None::<&DatabaseConnection>).await?;
    let records: Vec<ProjectInfo> = projects
        .into_iter()
        .map(|(project, values)| ProjectInfo::from_model(project, values))
        .collect();
    Ok(HttpResponse::Ok().json(records))
}

async fn create(req: web::Json<NewProject>) -> WebResult<HttpResponse> {
    let body = req.into_inner();
    body.validate()?;
    let name = body.name.unwrap();
    let status = body.status.unwrap();
    let entries = body.attributes.unwrap_or_default();
    check_attribute_ids(&entries).await?;

    let project =
        ProjectRepository::create_with_values(name, status, into_entries(entries), None)
            .await
            .map_err(|e| WebError::persistence("Failed to create project", e))?;

    let (project, values) =
        ProjectRepository::find_with_values(project.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Project.to_string()))?;
    Ok(HttpResponse::Created().json(ProjectInfo::from_model(project, values)))
}

async fn get_by_id(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    let (project, values) =
        ProjectRepository::find_with_values(path.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Project.to_string()))?;
    Ok(HttpResponse::Ok().json(ProjectInfo::from_model(project, values)))
}

async fn update(path: web::Path<PathId>, req: web::Json<UpdateProject>) -> WebResult<HttpResponse> {
    // Body shape errors win over a missing target row.
    let body = req.into_inner();
    body.validate()?;
    let entries = body.attributes.unwrap_or_default();
    check_attribute_ids(&entries).await?;

    if !ProjectRepository::exists_by_id(path.id, None::<&DatabaseConnection>).await? {
        return Err(WebError::NotFound(EntityType::Project.to_string()));
    }

    ProjectRepository::update_with_values(
        path.id,
        body.name,
        body.status,
        into_entries(entries),
        None,
    )
    .await
    .map_err(|e| WebError::persistence("Failed to update project", e))?;

    let (project, values) =
        ProjectRepository::find_with_values(path.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Project.to_string()))?;
    Ok(HttpResponse::Ok().json(ProjectInfo::from_model(project, values)))
}

async fn delete(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    if !ProjectRepository::exists_by_id(path.id, None::<&DatabaseConnection>).await? {
        return Err(WebError::NotFound(EntityType::Project.to_string()));
    }

    ProjectRepository::delete_deep(path.id, None)
        .await
        .map_err(|e| WebError::persistence("Failed to delete project", e))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Project deleted successfully")))
}
