use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum Project {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
    UpdatedAt,
}

pub fn create_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Project::Table)
        .if_not_exists()
        .col(pk_auto(Project::Id))
        .col(ColumnDef::new(Project::Name).string_len(255).not_null())
        .col(ColumnDef::new(Project::Status).string_len(255).not_null())
        .col(
            ColumnDef::new(Project::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Project::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_project_status")
        .table(Project::Table)
        .col(Project::Status)
        .to_owned()])
}
