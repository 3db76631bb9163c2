use crate::{get_db_connection, AttributeValueRepository};
use sea_orm::{
    sea_query::{Expr, Query, SimpleExpr},
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionError, TransactionTrait,
};
use tempo_error::{storage::StorageError, StorageResult};
use tempo_models::{
    domain::prelude::{FilterClause, ProjectListParams},
    entities::prelude::{
        Attribute, AttributeColumn, AttributeModel, AttributeValue, AttributeValueActiveModel,
        AttributeValueColumn, AttributeValueModel, Project, ProjectActiveModel, ProjectColumn,
        ProjectModel,
    },
    enums::common::OwnerKind,
};

pub struct ProjectRepository;

impl ProjectRepository {
    /// Projects matching every filter clause, with their attribute values and
    /// attribute definitions loaded in two follow-up queries.
    pub async fn find_filtered<C>(
        params: &ProjectListParams,
        db: Option<&C>,
    ) -> StorageResult<Vec<(ProjectModel, Vec<(AttributeValueModel, Option<AttributeModel>)>)>>
    where
        C: ConnectionTrait,
    {
        let mut query = Project::find();
        for (field, clause) in &params.filters {
            query = query.filter(Self::filter_expr(field, clause));
        }

        let projects = match db {
            Some(conn) => query.all(conn).await?,
            None => {
                let db = get_db_connection().await?;
                query.all(&db).await?
            }
        };

        let ids: Vec<i32> = projects.iter().map(|p| p.id).collect();
        let mut values =
            AttributeValueRepository::find_by_owners(ids, OwnerKind::Project, db).await?;

        Ok(projects
            .into_iter()
            .map(|project| {
                let (own, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut values)
                    .into_iter()
                    .partition(|(v, _)| v.entity_id == project.id);
                values = rest;
                (project, own)
            })
            .collect())
    }

    /// Translate one filter clause into a SQL expression.
    ///
    /// `name` and `status` compare project columns directly. Any other field
    /// is treated as an attribute name and matched through a correlated
    /// EXISTS over the owned attribute values.
    fn filter_expr(field: &str, clause: &FilterClause) -> SimpleExpr {
        match field {
            "name" => clause
                .operator
                .into_expr(Expr::col((Project, ProjectColumn::Name)), &clause.value),
            "status" => clause
                .operator
                .into_expr(Expr::col((Project, ProjectColumn::Status)), &clause.value),
            _ => {
                let value_matches = clause.operator.into_expr(
                    Expr::col((AttributeValue, AttributeValueColumn::Value)),
                    &clause.value,
                );
                Expr::exists(
                    Query::select()
                        .expr(Expr::value(1))
                        .from(AttributeValue)
                        .inner_join(
                            Attribute,
                            Expr::col((Attribute, AttributeColumn::Id))
                                .equals((AttributeValue, AttributeValueColumn::AttributeId)),
                        )
                        .and_where(
                            Expr::col((AttributeValue, AttributeValueColumn::EntityId))
                                .equals((Project, ProjectColumn::Id)),
                        )
                        .and_where(
                            Expr::col((AttributeValue, AttributeValueColumn::EntityType))
                                .eq(OwnerKind::Project),
                        )
                        .and_where(Expr::col((Attribute, AttributeColumn::Name)).eq(field))
                        .and_where(value_matches)
                        .to_owned(),
                )
            }
        }
    }

    pub async fn find_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<Option<ProjectModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Project::find_by_id(id).one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(Project::find_by_id(id).one(&db).await?)
            }
        }
    }

    pub async fn exists_by_id<C>(id: i32, db: Option<&C>) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(Project::find_by_id(id).count(conn).await? > 0),
            None => {
                let db = get_db_connection().await?;
                Ok(Project::find_by_id(id).count(&db).await? > 0)
            }
        }
    }

    pub async fn find_with_values<C>(
        id: i32,
        db: Option<&C>,
    ) -> StorageResult<Option<(ProjectModel, Vec<(AttributeValueModel, Option<AttributeModel>)>)>>
    where
        C: ConnectionTrait,
    {
        let Some(project) = Self::find_by_id(id, db).await? else {
            return Ok(None);
        };
        let values =
            AttributeValueRepository::find_by_owner(project.id, OwnerKind::Project, db).await?;
        Ok(Some((project, values)))
    }

    /// Create a project and its attribute value entries in a single transaction
    pub async fn create_with_values(
        name: String,
        status: String,
        entries: Vec<(i32, String)>,
        db: Option<&DatabaseConnection>,
    ) -> StorageResult<ProjectModel> {
        let conn = match db {
            Some(conn) => conn.clone(),
            None => get_db_connection().await?,
        };
        conn.transaction::<_, _, StorageError>(|txn| {
            Box::pin(async move {
                let project = ProjectActiveModel {
                    name: Set(name),
                    status: Set(status),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                for (attribute_id, value) in entries {
                    let entry = AttributeValueActiveModel {
                        attribute_id: Set(attribute_id),
                        entity_id: Set(project.id),
                        entity_type: Set(OwnerKind::Project),
                        value: Set(value),
                        ..Default::default()
                    };
                    AttributeValueRepository::upsert(entry, Some(txn)).await?;
                }

                Ok(project)
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => StorageError::from(db_err),
            TransactionError::Transaction(err) => err,
        })
    }

    /// Apply partial base-field changes and upsert attribute entries in a
    /// single transaction. Entries conflicting on the unique owner index
    /// overwrite the stored value rather than inserting a second row.
    pub async fn update_with_values(
        id: i32,
        name: Option<String>,
        status: Option<String>,
        entries: Vec<(i32, String)>,
        db: Option<&DatabaseConnection>,
    ) -> StorageResult<()> {
        let conn = match db {
            Some(conn) => conn.clone(),
            None => get_db_connection().await?,
        };
        conn.transaction::<_, _, StorageError>(|txn| {
            Box::pin(async move {
                let has_base_changes = name.is_some() || status.is_some();
                let mut project = ProjectActiveModel {
                    id: Set(id),
                    ..Default::default()
                };
                if let Some(name) = name {
                    project.name = Set(name);
                }
                if let Some(status) = status {
                    project.status = Set(status);
                }
                if has_base_changes {
                    project.update(txn).await?;
                }

                for (attribute_id, value) in entries {
                    let entry = AttributeValueActiveModel {
                        attribute_id: Set(attribute_id),
                        entity_id: Set(id),
                        entity_type: Set(OwnerKind::Project),
                        value: Set(value),
                        ..Default::default()
                    };
                    AttributeValueRepository::upsert(entry, Some(txn)).await?;
                }

                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => StorageError::from(db_err),
            TransactionError::Transaction(err) => err,
        })
    }

    /// Delete a project and its owned attribute values in a single transaction
    pub async fn delete_deep(id: i32, db: Option<&DatabaseConnection>) -> StorageResult<()> {
        let conn = match db {
            Some(conn) => conn.clone(),
            None => get_db_connection().await?,
        };
        conn.transaction::<_, _, StorageError>(|txn| {
            Box::pin(async move {
                // 1) delete owned attribute values
                AttributeValueRepository::delete_by_owner(id, OwnerKind::Project, Some(txn))
                    .await?;
                // 2) delete the project itself
                Project::delete_by_id(id).exec(txn).await?;
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
