use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, SqlErr,
};

use asklocal_core::domain::{Entity, FieldValue, FilterValue, Record};
use asklocal_core::error::RepoError;
use asklocal_core::ports::{BaseRepository, DuplicateLookup};

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self::shared(Arc::new(db))
    }

    /// Repository over a pool shared with other repositories.
    pub fn shared(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error onto the repository error kinds.
///
/// Unique and foreign key violations become `Constraint` so callers can treat
/// a lost insert race as "the row already exists".
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => {
                let msg = other.to_string();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    RepoError::Constraint(msg)
                } else {
                    RepoError::Query(msg)
                }
            }
        },
    }
}

/// Resolve a domain field name to the entity's column.
pub(crate) fn column<E: EntityTrait>(name: &str) -> Result<E::Column, RepoError> {
    E::Column::from_str(name).map_err(|_| {
        RepoError::Query(format!(
            "unknown column '{name}' on {}",
            E::default().table_name()
        ))
    })
}

/// Equality against a field of a draft. A missing optional becomes `IS NULL`.
pub(crate) fn field_condition<C: ColumnTrait>(column: C, value: FieldValue) -> SimpleExpr {
    match value {
        FieldValue::Int(v) => column.eq(v),
        FieldValue::OptionalInt(Some(v)) => column.eq(v),
        FieldValue::OptionalInt(None) => column.is_null(),
        FieldValue::Text(v) => column.eq(v),
        FieldValue::Timestamp(v) => column.eq(v),
    }
}

/// Equality against a normalized filter value.
pub(crate) fn filter_condition<E: EntityTrait>(
    name: &str,
    value: &FilterValue,
) -> Result<SimpleExpr, RepoError> {
    let column = column::<E>(name)?;
    Ok(match value {
        FilterValue::Int(v) => column.eq(*v),
        FilterValue::Text(v) => column.eq(v.as_str()),
    })
}

#[async_trait]
impl<E, T> BaseRepository<T> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = T::Id>,
    T: Entity + From<E::Model>,
    T::Draft: Into<E::ActiveModel>,
{
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&*self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = draft.into();
        let model = active_model.insert(&*self.db).await.map_err(map_db_err)?;

        let entity: T = model.into();
        tracing::debug!(entity = T::NAME, id = %entity.id(), "Inserted row");
        Ok(entity)
    }

    async fn delete(&self, id: T::Id) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl<E, T> DuplicateLookup<T> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    T: Entity + From<E::Model>,
{
    async fn find_equivalent(
        &self,
        candidate: &T::Draft,
        ignore: &[&'static str],
    ) -> Result<Option<T>, RepoError> {
        let mut condition = Condition::all();
        for (name, value) in candidate.fields() {
            if ignore.contains(&name) {
                continue;
            }
            condition = condition.add(field_condition(column::<E>(name)?, value));
        }

        let result = E::find()
            .filter(condition)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
