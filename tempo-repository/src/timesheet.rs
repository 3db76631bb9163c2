use crate::get_db_connection;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, LoaderTrait, PaginatorTrait,
};
use tempo_error::StorageResult;
use tempo_models::entities::prelude::{
    Project, ProjectModel, Timesheet, TimesheetActiveModel, TimesheetModel, User, UserModel,
};

pub struct TimesheetRepository;

impl TimesheetRepository {
    /// All timesheets with their reporting user and project loaded.
    pub async fn find_all_with_relations<C>(
        db: Option<&C>,
    ) -> StorageResult<Vec<(TimesheetModel, Option<UserModel>, Option<ProjectModel>)>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Self::load_relations(Timesheet::find().all(conn).await?, conn).await,
            None => {
                let db = get_db_connection().await?;
                Self::load_relations(Timesheet::find().all(&db).await?, &db).await
            }
        }
    }

    pub async fn find_with_relations<C>(
        id: i32,
        db: Option<&C>,
    ) -> StorageResult<Option<(TimesheetModel, Option<UserModel>, Option<ProjectModel>)>>
    where
        C: ConnectionTrait,
    {
        let rows = match db {
            Some(conn) => {
                Self::load_relations(Timesheet::find_by_id(id).all(conn).await?, conn).await?
            }
            None => {
                let db = get_db_connection().await?;
                Self::load_relations(Timesheet::find_by_id(id).all(&db).await?, &db).await?
            }
        };
        Ok(rows.into_iter().next())
    }

    async fn load_relations<C>(
        timesheets: Vec<TimesheetModel>,
        conn: &C,
    ) -> StorageResult<Vec<(TimesheetModel, Option<UserModel>, Option<ProjectModel>)>>
    where
        C: ConnectionTrait,
    {
        let users = timesheets.load_one(User, conn).await?;
        let projects = timesheets.load_one(Project, conn).await?;
        Ok(timesheets
            .into_iter()
            .zip(users)
            .zip(projects)
            .map(|((timesheet, user), project)| (timesheet, user, project))
            .collect())
    }

    pub async fn create<C>(
        timesheet: TimesheetActiveModel,
        db: Option<&C>,
    ) -> StorageResult<TimesheetModel>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(timesheet.insert(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(timesheet.insert(&db).await?)
            }
        }
    }

    pub async fn update<C>(
        timesheet: TimesheetActiveModel,
        db: Option<&C>,
    ) -> StorageResult<TimesheetModel>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(timesheet.update(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(timesheet.update(&db).await?)
            }
        }
    }

    pub async fn find_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<Option<TimesheetModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Timesheet::find_by_id(id).one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(Timesheet::find_by_id(id).one(&db).await?)
            }
        }
    }

    pub async fn exists_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Timesheet::find_by_id(id).count(conn).await? > 0),
            None => {
                let db = get_db_connection().await?;
                Ok(Timesheet::find_by_id(id).count(&db).await? > 0)
            }
        }
    }

    pub async fn delete<C>(id: i32, db: Option<&C>) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => {
                Timesheet::delete_by_id(id).exec(conn).await?;
            }
            None => {
                let db = get_db_connection().await?;
                Timesheet::delete_by_id(id).exec(&db).await?;
            }
        }
        Ok(())
    }
}
