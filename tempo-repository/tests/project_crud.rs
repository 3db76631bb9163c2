mod common;

use std::collections::BTreeMap;

use sea_orm::ActiveValue::Set;
use tempo_models::{
    domain::prelude::{FilterClause, FilterOperator, ProjectListParams},
    entities::prelude::AttributeActiveModel,
    enums::common::{AttributeKind, OwnerKind},
};
use tempo_repository::{AttributeRepository, AttributeValueRepository, ProjectRepository};

async fn create_attribute(db: &sea_orm::DatabaseConnection, name: &str) -> i32 {
    AttributeRepository::create(
        AttributeActiveModel {
            name: Set(name.into()),
            kind: Set(AttributeKind::Text),
            ..Default::default()
        },
        Some(db),
    )
    .await
    .unwrap()
    .id
}

fn filters(clauses: &[(&str, FilterOperator, &str)]) -> ProjectListParams {
    let mut filters = BTreeMap::new();
    for (field, operator, value) in clauses {
        filters.insert(
            field.to_string(),
            FilterClause {
                operator: *operator,
                value: value.to_string(),
            },
        );
    }
    ProjectListParams { filters }
}

#[tokio::test]
async fn create_with_values_links_every_entry() {
    let db = common::setup().await;
    let department = create_attribute(&db, "department").await;
    let region = create_attribute(&db, "region").await;

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![(department, "HR".into()), (region, "EMEA".into())],
        Some(&db),
    )
    .await
    .unwrap();

    let (found, values) = ProjectRepository::find_with_values(project.id, Some(&db))
        .await
        .unwrap()
        .expect("project should exist");
    assert_eq!(found.name, "Apollo");
    assert_eq!(values.len(), 2);
    assert!(values
        .iter()
        .all(|(_, attribute)| attribute.is_some()), "attribute definitions must be loaded");
}

#[tokio::test]
async fn upsert_is_idempotent_per_owner_and_attribute() {
    let db = common::setup().await;
    let department = create_attribute(&db, "department").await;

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![(department, "HR".into())],
        Some(&db),
    )
    .await
    .unwrap();

    // Same (attribute, owner) pair submitted twice more with new values.
    for value in ["Finance", "Legal"] {
        ProjectRepository::update_with_values(
            project.id,
            None,
            None,
            vec![(department, value.into())],
            Some(&db),
        )
        .await
        .unwrap();
    }

    let values = AttributeValueRepository::find_by_owner(project.id, OwnerKind::Project, Some(&db))
        .await
        .unwrap();
    assert_eq!(values.len(), 1, "upsert must never create a second row");
    assert_eq!(values[0].0.value, "Legal");
}

#[tokio::test]
async fn update_with_values_applies_partial_base_fields() {
    let db = common::setup().await;

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    ProjectRepository::update_with_values(
        project.id,
        None,
        Some("archived".into()),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    let found = ProjectRepository::find_by_id(project.id, Some(&db))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Apollo");
    assert_eq!(found.status, "archived");
}

#[tokio::test]
async fn static_and_dynamic_filters_intersect() {
    let db = common::setup().await;
    let department = create_attribute(&db, "department").await;

    let matching = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![(department, "HR".into())],
        Some(&db),
    )
    .await
    .unwrap();
    // Same attribute value, wrong status.
    ProjectRepository::create_with_values(
        "Borealis".into(),
        "archived".into(),
        vec![(department, "HR".into())],
        Some(&db),
    )
    .await
    .unwrap();
    // Right status, wrong attribute value.
    ProjectRepository::create_with_values(
        "Citadel".into(),
        "active".into(),
        vec![(department, "Finance".into())],
        Some(&db),
    )
    .await
    .unwrap();

    let params = filters(&[
        ("status", FilterOperator::Eq, "active"),
        ("department", FilterOperator::Eq, "HR"),
    ]);
    let rows = ProjectRepository::find_filtered(&params, Some(&db))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.id, matching.id);
    assert_eq!(rows[0].1.len(), 1, "values must be eagerly loaded");
}

#[tokio::test]
async fn like_filter_matches_partial_names() {
    let db = common::setup().await;

    ProjectRepository::create_with_values("Apollo".into(), "active".into(), vec![], Some(&db))
        .await
        .unwrap();
    ProjectRepository::create_with_values("Borealis".into(), "active".into(), vec![], Some(&db))
        .await
        .unwrap();

    let params = filters(&[("name", FilterOperator::Like, "Apo%")]);
    let rows = ProjectRepository::find_filtered(&params, Some(&db))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.name, "Apollo");
}

#[tokio::test]
async fn delete_deep_removes_project_and_owned_values() {
    let db = common::setup().await;
    let department = create_attribute(&db, "department").await;

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![(department, "HR".into())],
        Some(&db),
    )
    .await
    .unwrap();

    ProjectRepository::delete_deep(project.id, Some(&db))
        .await
        .unwrap();

    assert!(ProjectRepository::find_by_id(project.id, Some(&db))
        .await
        .unwrap()
        .is_none());
    let leftover =
        AttributeValueRepository::find_by_owner(project.id, OwnerKind::Project, Some(&db))
            .await
            .unwrap();
    assert!(leftover.is_empty());
}
