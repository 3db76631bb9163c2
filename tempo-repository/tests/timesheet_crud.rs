mod common;

use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use tempo_models::{
    constants::SEED_USER_EMAIL, entities::prelude::TimesheetActiveModel,
};
use tempo_repository::{ProjectRepository, TimesheetRepository, UserRepository};

async fn seeded_user_id(db: &sea_orm::DatabaseConnection) -> i32 {
    UserRepository::find_by_email(SEED_USER_EMAIL, Some(db))
        .await
        .unwrap()
        .expect("migration seeds a default user")
        .id
}

#[tokio::test]
async fn create_and_load_with_relations() {
    let db = common::setup().await;
    let user_id = seeded_user_id(&db).await;
    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    let created = TimesheetRepository::create(
        TimesheetActiveModel {
            task_name: Set("Code review".into()),
            date: Set(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            hours: Set(2.5),
            user_id: Set(user_id),
            project_id: Set(project.id),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let (timesheet, user, found_project) =
        TimesheetRepository::find_with_relations(created.id, Some(&db))
            .await
            .unwrap()
            .expect("timesheet should exist");
    assert_eq!(timesheet.hours, 2.5);
    assert_eq!(user.expect("user loaded").email, SEED_USER_EMAIL);
    assert_eq!(found_project.expect("project loaded").name, "Apollo");
}

#[tokio::test]
async fn list_loads_relations_for_every_row() {
    let db = common::setup().await;
    let user_id = seeded_user_id(&db).await;
    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    for day in 1..=3 {
        TimesheetRepository::create(
            TimesheetActiveModel {
                task_name: Set(format!("Task {day}")),
                date: Set(NaiveDate::from_ymd_opt(2024, 3, day).unwrap()),
                hours: Set(8.0),
                user_id: Set(user_id),
                project_id: Set(project.id),
                ..Default::default()
            },
            Some(&db),
        )
        .await
        .unwrap();
    }

    let rows = TimesheetRepository::find_all_with_relations(Some(&db))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|(_, user, project)| user.is_some() && project.is_some()));
}

#[tokio::test]
async fn update_applies_partial_changes() {
    let db = common::setup().await;
    let user_id = seeded_user_id(&db).await;
    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    let created = TimesheetRepository::create(
        TimesheetActiveModel {
            task_name: Set("Draft".into()),
            date: Set(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            hours: Set(1.0),
            user_id: Set(user_id),
            project_id: Set(project.id),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    let updated = TimesheetRepository::update(
        TimesheetActiveModel {
            id: Set(created.id),
            hours: Set(7.5),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    assert_eq!(updated.hours, 7.5);
    assert_eq!(updated.task_name, "Draft");
}

#[tokio::test]
async fn delete_removes_the_row() {
    let db = common::setup().await;
    let user_id = seeded_user_id(&db).await;
    let project = ProjectRepository::create_with_values(
        "Apollo".into(),
        "active".into(),
        vec![],
        Some(&db),
    )
    .await
    .unwrap();

    let created = TimesheetRepository::create(
        TimesheetActiveModel {
            task_name: Set("Cleanup".into()),
            date: Set(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            hours: Set(0.5),
            user_id: Set(user_id),
            project_id: Set(project.id),
            ..Default::default()
        },
        Some(&db),
    )
    .await
    .unwrap();

    TimesheetRepository::delete(created.id, Some(&db))
        .await
        .unwrap();
    assert!(TimesheetRepository::find_by_id(created.id, Some(&db))
        .await
        .unwrap()
        .is_none());
}
