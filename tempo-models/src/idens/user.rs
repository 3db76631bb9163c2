use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    FirstName,
    Email,
    Password,
    CreatedAt,
    UpdatedAt,
}

pub fn create_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .if_not_exists()
        .col(pk_auto(User::Id))
        .col(ColumnDef::new(User::FirstName).string_len(255).not_null())
        .col(ColumnDef::new(User::Email).string_len(255).not_null())
        .col(
            ColumnDef::new(User::Password)
                .string()
                .not_null()
                .comment("bcrypt hash"),
        )
        .col(
            ColumnDef::new(User::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(User::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("uq_user_email")
        .table(User::Table)
        .col(User::Email)
        .unique()
        .to_owned()])
}
