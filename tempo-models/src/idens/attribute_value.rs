use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum AttributeValue {
    Table,
    Id,
    AttributeId,
    EntityId,
    EntityType,
    Value,
    CreatedAt,
    UpdatedAt,
}

pub fn create_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(AttributeValue::Table)
        .if_not_exists()
        .col(pk_auto(AttributeValue::Id))
        .col(
            ColumnDef::new(AttributeValue::AttributeId)
                .integer()
                .not_null()
                .comment("FK: attribute.id"),
        )
        .col(
            ColumnDef::new(AttributeValue::EntityId)
                .integer()
                .not_null()
                .comment("Owning entity id, typed by entity_type"),
        )
        .col(
            ColumnDef::new(AttributeValue::EntityType)
                .string_len(32)
                .not_null()
                .comment("Owner discriminator (project)"),
        )
        .col(ColumnDef::new(AttributeValue::Value).string().not_null())
        .col(
            ColumnDef::new(AttributeValue::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(AttributeValue::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        // Upsert target: one value per attribute per owning entity.
        Index::create()
            .name("uq_attribute_value_owner")
            .table(AttributeValue::Table)
            .col(AttributeValue::AttributeId)
            .col(AttributeValue::EntityId)
            .col(AttributeValue::EntityType)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_attribute_value_entity")
            .table(AttributeValue::Table)
            .col(AttributeValue::EntityId)
            .col(AttributeValue::EntityType)
            .to_owned(),
    ])
}
