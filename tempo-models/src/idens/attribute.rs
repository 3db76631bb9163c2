use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum Attribute {
    Table,
    Id,
    Name,
    Type,
    CreatedAt,
    UpdatedAt,
}

pub fn create_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Attribute::Table)
        .if_not_exists()
        .col(pk_auto(Attribute::Id))
        .col(
            ColumnDef::new(Attribute::Name)
                .string_len(255)
                .not_null()
                .comment("Unique attribute name"),
        )
        .col(
            ColumnDef::new(Attribute::Type)
                .string_len(16)
                .not_null()
                .comment("text | date | number | select"),
        )
        .col(
            ColumnDef::new(Attribute::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Attribute::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("uq_attribute_name")
        .table(Attribute::Table)
        .col(Attribute::Name)
        .unique()
        .to_owned()])
}
