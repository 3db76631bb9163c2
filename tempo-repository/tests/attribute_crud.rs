mod common;

use sea_orm::ActiveValue::Set;
use tempo_models::{
    entities::prelude::{AttributeActiveModel, AttributeValueActiveModel},
    enums::common::{AttributeKind, OwnerKind},
};
use tempo_repository::{AttributeRepository, AttributeValueRepository, ProjectRepository};

#[tokio::test]
async fn create_and_find_attribute() {
    let db = common::setup().await;

    let created = AttributeRepository::create(
        AttributeActiveModel {
            name: Set("department".into()),
            kind: Set(AttributeKind::Text),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let found = AttributeRepository::find_by_id(created.id, Some(&db))
        .await
        .unwrap()
        .expect("attribute should exist");
    assert_eq!(found.name, "department");
    assert_eq!(found.kind, AttributeKind::Text);

    let by_name = AttributeRepository::find_by_name("department", Some(&db))
        .await
        .unwrap();
    assert_eq!(by_name.map(|a| a.id), Some(created.id));
}

#[tokio::test]
async fn update_changes_name_and_kind() {
    let db = common::setup().await;

    let created = AttributeRepository::create(
        AttributeActiveModel {
            name: Set("start".into()),
            kind: Set(AttributeKind::Text),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let updated = AttributeRepository::update(
        AttributeActiveModel {
            id: Set(created.id),
            name: Set("start_date".into()),
            kind: Set(AttributeKind::Date),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "start_date");
    assert_eq!(updated.kind, AttributeKind::Date);
}

#[tokio::test]
async fn delete_deep_removes_attribute_and_its_values() {
    let db = common::setup().await;

    let attribute = AttributeRepository::create(
        AttributeActiveModel {
            name: Set("department".into()),
            kind: Set(AttributeKind::Text),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![(attribute.id, "HR".into())],
        Some(&db),
    )
    .await
    .unwrap();

    AttributeRepository::delete_deep(attribute.id, Some(&db))
        .await
        .unwrap();

    assert!(AttributeRepository::find_by_id(attribute.id, Some(&db))
        .await
        .unwrap()
        .is_none());
    let leftover = AttributeValueRepository::find_by_owner(project.id, OwnerKind::Project, Some(&db))
        .await
        .unwrap();
    assert!(leftover.is_empty(), "values must be cascaded away");
}

#[tokio::test]
async fn find_existing_ids_reports_only_known_attributes() {
    let db = common::setup().await;

    let attribute = AttributeRepository::create(
        AttributeActiveModel {
            name: Set("priority".into()),
            kind: Set(AttributeKind::Number),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let existing = AttributeRepository::find_existing_ids(vec![attribute.id, 9999], Some(&db))
        .await
        .unwrap();
    assert_eq!(existing, vec![attribute.id]);
}

#[tokio::test]
async fn find_all_with_values_pairs_values_with_their_attribute() {
    let db = common::setup().await;

    let attribute = AttributeRepository::create(
        AttributeActiveModel {
            name: Set("department".into()),
            kind: Set(AttributeKind::Text),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    AttributeValueRepository::upsert(
        AttributeValueActiveModel {
            attribute_id: Set(attribute.id),
            entity_id: Set(project.id),
            entity_type: Set(OwnerKind::Project),
            value: Set("HR".into()),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let all = AttributeRepository::find_all_with_values(Some(&db))
        .await
        .unwrap();
    let (found, values) = all
        .into_iter()
        .find(|(a, _)| a.id == attribute.id)
        .expect("created attribute should be listed");
    assert_eq!(found.name, "department");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "HR");
}
