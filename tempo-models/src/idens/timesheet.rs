use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum Timesheet {
    Table,
    Id,
    TaskName,
    Date,
    Hours,
    UserId,
    ProjectId,
    CreatedAt,
    UpdatedAt,
}

pub fn create_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Timesheet::Table)
        .if_not_exists()
        .col(pk_auto(Timesheet::Id))
        .col(ColumnDef::new(Timesheet::TaskName).string_len(255).not_null())
        .col(ColumnDef::new(Timesheet::Date).date().not_null())
        .col(ColumnDef::new(Timesheet::Hours).double().not_null())
        .col(
            ColumnDef::new(Timesheet::UserId)
                .integer()
                .not_null()
                .comment("FK: user.id"),
        )
        .col(
            ColumnDef::new(Timesheet::ProjectId)
                .integer()
                .not_null()
                .comment("FK: project.id"),
        )
        .col(
            ColumnDef::new(Timesheet::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Timesheet::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("idx_timesheet_user")
            .table(Timesheet::Table)
            .col(Timesheet::UserId)
            .to_owned(),
        Index::create()
            .name("idx_timesheet_project")
            .table(Timesheet::Table)
            .col(Timesheet::ProjectId)
            .to_owned(),
    ])
}
