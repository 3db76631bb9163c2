use crate::storage::StorageError;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Field name to human-readable messages, as rendered in 400 bodies.
pub type FieldErrorMap = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthenticated")]
    Unauthorized,
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("validation failed")]
    Validation(FieldErrorMap),
    #[error("{0} not found")]
    NotFound(String),
    /// Persistence failure surfaced after a rolled-back transaction.
    /// The raw database error text is preserved in the response body.
    #[error("{context}: `{source}`")]
    Persistence {
        context: String,
        #[source]
        source: StorageError,
    },
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("DBError: `{0}`")]
    StorageError(#[from] StorageError),
}

impl WebError {
    /// Build a single-field validation error, for referential checks that
    /// the validator derives cannot express (e.g. foreign keys must exist).
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = FieldErrorMap::new();
        map.insert(field.into(), vec![message.into()]);
        WebError::Validation(map)
    }

    /// Wrap a storage failure with the operation context for a 500 response.
    pub fn persistence(context: impl Into<String>, source: StorageError) -> Self {
        WebError::Persistence {
            context: context.into(),
            source,
        }
    }
}

impl From<ValidationErrors> for WebError {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = FieldErrorMap::new();
        flatten_into("", &errors, &mut map);
        WebError::Validation(map)
    }
}

/// Flatten nested validator errors into `field -> [messages]`, producing
/// indexed keys for list items (`attributes.0.value`).
fn flatten_into(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrorMap) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let entry = out.entry(key.clone()).or_default();
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{key} is invalid ({})", err.code));
                    entry.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(&key, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_into(&format!("{key}.{index}"), nested, out);
                }
            }
        }
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        match self {
            WebError::Unauthorized => HttpResponse::Unauthorized().json(json!({
                "message": "Unauthenticated"
            })),
            WebError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            WebError::Validation(fields) => HttpResponse::BadRequest().json(json!({
                "errors": fields
            })),
            WebError::NotFound(entity) => HttpResponse::NotFound().json(json!({
                "message": format!("{entity} not found")
            })),
            WebError::Persistence { context, source } => {
                error!(error = %source, "{context}");
                HttpResponse::InternalServerError().json(json!({
                    "message": context,
                    "error": source.to_string()
                }))
            }
            WebError::InternalError(msg) => {
                error!("{msg}");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error",
                    "error": msg
                }))
            }
            WebError::StorageError(err) => {
                error!(error = %err, "database error");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Database error",
                    "error": err.to_string()
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use validator::Validate;

    #[derive(Validate)]
    struct Entry {
        #[validate(length(min = 1, message = "value is required"))]
        value: String,
    }

    #[derive(Validate)]
    struct Payload {
        #[validate(length(max = 8, message = "name is too long"))]
        name: String,
        #[validate(nested)]
        attributes: Vec<Entry>,
    }

    #[test]
    fn validation_errors_flatten_with_list_indices() {
        let payload = Payload {
            name: "way too long for the limit".into(),
            attributes: vec![
                Entry {
                    value: "ok".into(),
                },
                Entry {
                    value: String::new(),
                },
            ],
        };
        let err = WebError::from(payload.validate().unwrap_err());
        match err {
            WebError::Validation(map) => {
                assert_eq!(map["name"], vec!["name is too long"]);
                assert_eq!(map["attributes.1.value"], vec!["value is required"]);
                assert!(!map.contains_key("attributes.0.value"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn not_found_renders_404_with_message() {
        let resp = WebError::NotFound("Project".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn persistence_renders_500_with_raw_error() {
        let err = WebError::persistence(
            "Failed to create project",
            StorageError::DBError(sea_orm::DbErr::Custom("disk full".into())),
        );
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn field_helper_produces_single_entry() {
        match WebError::field("user_id", "user 7 does not exist") {
            WebError::Validation(map) => {
                assert_eq!(map.len(), 1);
                assert_eq!(map["user_id"], vec!["user 7 does not exist"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
