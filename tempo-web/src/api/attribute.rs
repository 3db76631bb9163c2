//! Attribute definition management endpoints

use actix_web::{web, HttpResponse};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tempo_error::{web::WebError, WebResult};
use tempo_models::{
    domain::{
        attribute::parse_kind,
        prelude::{
            AttributeInfo, AttributeValueInfo, AttributeWithValues, MessageResponse, NewAttribute,
            PathId, UpdateAttribute,
        },
    },
    entities::prelude::AttributeActiveModel,
    enums::common::{AttributeKind, EntityType},
};
use tempo_repository::AttributeRepository;
use validator::Validate;

pub(super) const ROUTER_PREFIX: &str = "/attributes";

/// Configure attribute routes
///
/// # Routes
/// - GET `` : List all attributes with their values
/// - POST `` : Create an attribute
/// - GET `/{id}`: Retrieve one attribute with its values
/// - PUT `/{id}`: Update an attribute
/// - DELETE `/{id}`: Delete an attribute and its values
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete));
}

/// Resolve a validated type token. Validation has already vetted membership,
/// so a miss here only guards against the two drifting apart.
fn parse_type(raw: Option<&str>) -> Result<AttributeKind, WebError> {
    raw.and_then(parse_kind)
        .ok_or_else(|| WebError::field("type", "The selected type is invalid."))
}

/// The request field is named `type`; the Rust side calls it `kind`, so the
/// validator reports it under the wrong key.
fn validate_renaming_type(body: &impl Validate) -> Result<(), WebError> {
    body.validate().map_err(|e| {
        let mut err = WebError::from(e);
        if let WebError::Validation(map) = &mut err {
            if let Some(messages) = map.remove("kind") {
                map.entry("type".into()).or_default().extend(messages);
            }
        }
        err
    })
}

async fn list() -> WebResult<HttpResponse> {
    let attributes = AttributeRepository::find_all_with_values(None::<&DatabaseConnection>).await?;
    let records: Vec<AttributeWithValues> = attributes
        .into_iter()
        .map(|(attribute, values)| AttributeWithValues {
            attribute: attribute.into(),
            values: values
                .into_iter()
                .map(|value| AttributeValueInfo::from_model(value, None))
                .collect(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(records))
}

async fn create(req: web::Json<NewAttribute>) -> WebResult<HttpResponse> {
    let body = req.into_inner();
    validate_renaming_type(&body)?;
    let name = body.name.unwrap();
    let kind = parse_type(body.kind.as_deref())?;

    if AttributeRepository::find_by_name(&name, None::<&DatabaseConnection>)
        .await?
        .is_some()
    {
        return Err(WebError::field("name", "The name has already been taken."));
    }

    let attribute = AttributeRepository::create(
        AttributeActiveModel {
            name: Set(name),
            kind: Set(kind),
            ..Default::default()
        },
        None::<&DatabaseConnection>,
    )
    .await
    .map_err(|e| WebError::persistence("Failed to create attribute", e))?;

    Ok(HttpResponse::Created().json(AttributeInfo::from(attribute)))
}

async fn get_by_id(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    let (attribute, values) =
        AttributeRepository::find_with_values(path.id, None::<&DatabaseConnection>)
            .await?
            .ok_or_else(|| WebError::NotFound(EntityType::Attribute.to_string()))?;

    Ok(HttpResponse::Ok().json(AttributeWithValues {
        attribute: attribute.into(),
        values: values
            .into_iter()
            .map(|value| AttributeValueInfo::from_model(value, None))
            .collect(),
    }))
}

async fn update(
    path: web::Path<PathId>,
    req: web::Json<UpdateAttribute>,
) -> WebResult<HttpResponse> {
    // Body shape errors win over a missing target row.
    let body = req.into_inner();
    validate_renaming_type(&body)?;
    let kind = parse_type(body.kind.as_deref())?;

    let existing = AttributeRepository::find_by_id(path.id, None::<&DatabaseConnection>)
        .await?
        .ok_or_else(|| WebError::NotFound(EntityType::Attribute.to_string()))?;

    if let Some(name) = body.name.as_deref() {
        let taken = AttributeRepository::find_by_name(name, None::<&DatabaseConnection>)
            .await?
            .is_some_and(|other| other.id != existing.id);
        if taken {
            return Err(WebError::field("name", "The name has already been taken."));
        }
    }

    let mut attribute = AttributeActiveModel {
        id: Set(existing.id),
        kind: Set(kind),
        ..Default::default()
    };
    if let Some(name) = body.name {
        attribute.name = Set(name);
    }

    let updated = AttributeRepository::update(attribute, None::<&DatabaseConnection>)
        .await
        .map_err(|e| WebError::persistence("Failed to update attribute", e))?;

    Ok(HttpResponse::Ok().json(AttributeInfo::from(updated)))
}

async fn delete(path: web::Path<PathId>) -> WebResult<HttpResponse> {
    if !AttributeRepository::exists_by_id(path.id, None::<&DatabaseConnection>).await? {
        return Err(WebError::NotFound(EntityType::Attribute.to_string()));
    }

    AttributeRepository::delete_deep(path.id, None)
        .await
        .map_err(|e| WebError::persistence("Failed to delete attribute", e))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Attribute deleted successfully")))
}
