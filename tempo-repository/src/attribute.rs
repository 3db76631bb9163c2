use crate::{get_db_connection, AttributeValueRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionError, TransactionTrait,
};
use tempo_error::{storage::StorageError, StorageResult};
use tempo_models::entities::prelude::{
    Attribute, AttributeActiveModel, AttributeColumn, AttributeModel, AttributeValue,
    AttributeValueModel,
};

pub struct AttributeRepository;

impl AttributeRepository {
    pub async fn create<C>(
        attribute: AttributeActiveModel,
        db: Option<&C>,
    ) -> StorageResult<AttributeModel>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(attribute.insert(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(attribute.insert(&db).await?)
            }
        }
    }

    pub async fn update<C>(
        attribute: AttributeActiveModel,
        db: Option<&C>,
    ) -> StorageResult<AttributeModel>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(attribute.update(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(attribute.update(&db).await?)
            }
        }
    }

    pub async fn find_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<Option<AttributeModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Attribute::find_by_id(id).one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(Attribute::find_by_id(id).one(&db).await?)
            }
        }
    }

    pub async fn find_by_name<C>(
        name: &str,
        db: Option<&C>,
    ) -> StorageResult<Option<AttributeModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => {
                Ok(Attribute::find()
                    .filter(AttributeColumn::Name.eq(name))
                    .one(conn)
                    .await?)
            }
            None => {
                let db = get_db_connection().await?;
                Ok(Attribute::find()
                    .filter(AttributeColumn::Name.eq(name))
                    .one(&db)
                    .await?)
            }
        }
    }

    /// All attributes, each paired with its assigned values.
    pub async fn find_all_with_values<C>(
        db: Option<&C>,
    ) -> StorageResult<Vec<(AttributeModel, Vec<AttributeValueModel>)>>
    where
        C: ConnectionTrait,
    {
        let query = Attribute::find().find_with_related(AttributeValue);
        match db {
            Some(conn) => Ok(query.all(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(query.all(&db).await?)
            }
        }
    }

    pub async fn find_with_values<C>(
        id: i32,
        db: Option<&C>,
    ) -> StorageResult<Option<(AttributeModel, Vec<AttributeValueModel>)>>
    where
        C: ConnectionTrait,
    {
        let query = Attribute::find_by_id(id).find_with_related(AttributeValue);
        match db {
            Some(conn) => Ok(query.all(conn).await?.pop()),
            None => {
                let db = get_db_connection().await?;
                Ok(query.all(&db).await?.pop())
            }
        }
    }

    /// Which of the given attribute ids actually exist.
    pub async fn find_existing_ids<C>(ids: Vec<i32>, db: Option<&C>) -> StorageResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let query = Attribute::find().filter(AttributeColumn::Id.is_in(ids));
        let found = match db {
            Some(conn) => query.all(conn).await?,
            None => {
                let db = get_db_connection().await?;
                query.all(&db).await?
            }
        };
        Ok(found.into_iter().map(|a| a.id).collect())
    }

    pub async fn exists_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Attribute::find_by_id(id).count(conn).await? > 0),
            None => {
                let db = get_db_connection().await?;
                Ok(Attribute::find_by_id(id).count(&db).await? > 0)
            }
        }
    }

    /// Delete an attribute and all values referencing it in a single transaction
    pub async fn delete_deep(id: i32, db: Option<&DatabaseConnection>) -> StorageResult<()> {
        let conn = match db {
            Some(conn) => conn.clone(),
            None => get_db_connection().await?,
        };
        conn.transaction::<_, _, StorageError>(|txn| {
            Box::pin(async move {
                // 1) delete values referencing this attribute
                AttributeValueRepository::delete_by_attribute_id(id, Some(txn)).await?;
                // 2) delete the attribute itself
                Attribute::delete_by_id(id).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => StorageError::from(db_err),
            TransactionError::Transaction(err) => err,
        })?;
        Ok(())
    }
}
