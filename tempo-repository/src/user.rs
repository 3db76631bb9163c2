use crate::get_db_connection;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};
use tempo_error::StorageResult;
use tempo_models::entities::prelude::{User, UserActiveModel, UserColumn, UserModel};

pub struct UserRepository;

impl UserRepository {
    pub async fn create<C>(user: UserActiveModel, db: Option<&C>) -> StorageResult<UserModel>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(user.insert(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(user.insert(&db).await?)
            }
        }
    }

    pub async fn find_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<Option<UserModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(User::find_by_id(id).one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(User::find_by_id(id).one(&db).await?)
            }
        }
    }

    pub async fn find_by_email<C>(email: &str, db: Option<&C>) -> StorageResult<Option<UserModel>>
    where
        C: ConnectionTrait,
    {
        let query = User::find().filter(UserColumn::Email.eq(email));
        match db {
            Some(conn) => Ok(query.one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(query.one(&db).await?)
            }
        }
    }

    pub async fn exists_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(User::find_by_id(id).count(conn).await? > 0),
            None => {
                let db = get_db_connection().await?;
                Ok(User::find_by_id(id).count(&db).await? > 0)
            }
        }
    }
}
