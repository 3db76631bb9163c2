use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, DbBackend, Statement};
use tempo_models::constants::SEED_USER_EMAIL;
use tempo_models::idens::{attribute, attribute_value, project, timesheet, user};
use tempo_utils::hash::bcrypt_hash;
use tracing::{info, instrument};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_tables(manager).await?;
        create_indexes(manager).await?;
        create_sqlite_updated_at_triggers(manager).await?;
        seeding_data(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(timesheet::Timesheet::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(attribute_value::AttributeValue::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(attribute::Attribute::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(project::Project::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(user::User::Table).to_owned())
            .await?;
        Ok(())
    }
}

async fn create_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let backend = manager.get_database_backend();
    manager.create_table(user::create_table(backend)).await?;
    manager
        .create_table(attribute::create_table(backend))
        .await?;
    manager.create_table(project::create_table(backend)).await?;
    manager
        .create_table(attribute_value::create_table(backend))
        .await?;
    manager
        .create_table(timesheet::create_table(backend))
        .await?;
    Ok(())
}

async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let backend = manager.get_database_backend();
    let index_sets = [
        user::create_indexes(backend),
        attribute::create_indexes(backend),
        project::create_indexes(backend),
        attribute_value::create_indexes(backend),
        timesheet::create_indexes(backend),
    ];
    for stmt in index_sets.into_iter().flatten().flatten() {
        manager.create_index(stmt).await?;
    }
    Ok(())
}

/// Create SQLite triggers to automatically update the `updated_at` column on row updates.
///
/// SQLite column defaults do not support `ON UPDATE CURRENT_TIMESTAMP`, so an
/// `AFTER UPDATE` trigger per table refreshes `updated_at` whenever the
/// application did not set it explicitly. The `WHEN` clause prevents infinite
/// recursion.
async fn create_sqlite_updated_at_triggers(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if manager.get_database_backend() != DatabaseBackend::Sqlite {
        return Ok(());
    }

    let conn = manager.get_connection();
    for table_name in ["user", "attribute", "project", "attribute_value", "timesheet"] {
        let trigger_name = format!("trg_{}_updated_at", table_name);
        let sql = format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS "{trigger_name}"
            AFTER UPDATE ON "{table_name}"
            FOR EACH ROW
            WHEN NEW."updated_at" = OLD."updated_at"
            BEGIN
                UPDATE "{table_name}" SET "updated_at" = CURRENT_TIMESTAMP WHERE rowid = NEW.rowid;
            END;
            "#
        );

        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
            .await?;
    }

    Ok(())
}

/// Seed the default account so a fresh install can log in immediately.
#[instrument(name = "seeding-data", skip_all)]
async fn seeding_data(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let backend: DbBackend = manager.get_database_backend();
    let insert = Query::insert()
        .into_table(user::User::Table)
        .columns([
            user::User::FirstName,
            user::User::Email,
            user::User::Password,
        ])
        .values_panic([
            "john doe".into(),
            SEED_USER_EMAIL.into(),
            bcrypt_hash("password123").into(),
        ])
        .on_conflict(
            OnConflict::column(user::User::Email)
                .do_nothing()
                .to_owned(),
        )
        .to_owned();

    manager.get_connection().execute(backend.build(&insert)).await?;
    info!(email = SEED_USER_EMAIL, "seeded default user");
    Ok(())
}
