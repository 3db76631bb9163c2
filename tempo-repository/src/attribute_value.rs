use crate::get_db_connection;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use tempo_error::StorageResult;
use tempo_models::{
    entities::prelude::{
        Attribute, AttributeModel, AttributeValue, AttributeValueActiveModel,
        AttributeValueColumn, AttributeValueModel,
    },
    enums::common::OwnerKind,
};

pub struct AttributeValueRepository;

impl AttributeValueRepository {
    /// Insert or update the value for one (attribute, owner) pair.
    ///
    /// Conflicts on the unique (attribute_id, entity_id, entity_type) index
    /// overwrite the stored value in place, so repeated submissions of the
    /// same pair never produce a second row.
    pub async fn upsert<C>(
        value: AttributeValueActiveModel,
        db: Option<&C>,
    ) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let insert = AttributeValue::insert(value).on_conflict(
            OnConflict::columns([
                AttributeValueColumn::AttributeId,
                AttributeValueColumn::EntityId,
                AttributeValueColumn::EntityType,
            ])
            .update_column(AttributeValueColumn::Value)
            .to_owned(),
        );
        match db {
            Some(conn) => {
                insert.exec(conn).await?;
            }
            None => {
                let db = get_db_connection().await?;
                insert.exec(&db).await?;
            }
        }
        Ok(())
    }

    pub async fn delete_by_attribute_id<C>(attribute_id: i32, db: Option<&C>) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let delete =
            AttributeValue::delete_many().filter(AttributeValueColumn::AttributeId.eq(attribute_id));
        match db {
            Some(conn) => {
                delete.exec(conn).await?;
            }
            None => {
                let db = get_db_connection().await?;
                delete.exec(&db).await?;
            }
        }
        Ok(())
    }

    pub async fn delete_by_owner<C>(
        entity_id: i32,
        entity_type: OwnerKind,
        db: Option<&C>,
    ) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let delete = AttributeValue::delete_many()
            .filter(AttributeValueColumn::EntityId.eq(entity_id))
            .filter(AttributeValueColumn::EntityType.eq(entity_type));
        match db {
            Some(conn) => {
                delete.exec(conn).await?;
            }
            None => {
                let db = get_db_connection().await?;
                delete.exec(&db).await?;
            }
        }
        Ok(())
    }

    /// Values owned by one entity, each with its attribute definition.
    pub async fn find_by_owner<C>(
        entity_id: i32,
        entity_type: OwnerKind,
        db: Option<&C>,
    ) -> StorageResult<Vec<(AttributeValueModel, Option<AttributeModel>)>>
    where
        C: ConnectionTrait,
    {
        let query = AttributeValue::find()
            .filter(AttributeValueColumn::EntityId.eq(entity_id))
            .filter(AttributeValueColumn::EntityType.eq(entity_type))
            .find_also_related(Attribute);
        match db {
            Some(conn) => Ok(query.all(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(query.all(&db).await?)
            }
        }
    }

    /// Values owned by any of the given entities, each with its attribute.
    pub async fn find_by_owners<C>(
        entity_ids: Vec<i32>,
        entity_type: OwnerKind,
        db: Option<&C>,
    ) -> StorageResult<Vec<(AttributeValueModel, Option<AttributeModel>)>>
    where
        C: ConnectionTrait,
    {
        if entity_ids.is_empty() {
            return Ok(vec![]);
        }
        let query = AttributeValue::find()
            .filter(AttributeValueColumn::EntityId.is_in(entity_ids))
            .filter(AttributeValueColumn::EntityType.eq(entity_type))
            .find_also_related(Attribute);
        match db {
            Some(conn) => Ok(query.all(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(query.all(&db).await?)
            }
        }
    }
}
