use std::future::Future;
use std::marker::PhantomData;

use sqlx::SqlitePool;

use super::entity::{Entity, Record};
use super::error::{SqlxErrorExt, SqlxResult};
use super::query::QueryBuilder;

/// Async CRUD operations over one entity type.
///
/// Each method is a single statement; nothing spans a transaction.
pub trait Repository<T: Entity>: Send + Sync {
    /// All rows, ascending by id.
    fn find_all(&self) -> impl Future<Output = SqlxResult<Vec<T>>> + Send;

    /// Rows matching every condition of `filter`, ascending by id.
    fn find_where(&self, filter: QueryBuilder) -> impl Future<Output = SqlxResult<Vec<T>>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = SqlxResult<Option<T>>> + Send;

    /// Insert `record` and return the row with its generated id.
    fn insert(&self, record: &T::Record) -> impl Future<Output = SqlxResult<T>> + Send;

    /// Overwrite every column of row `id`. Returns whether a row matched.
    fn update(&self, id: i64, record: &T::Record) -> impl Future<Output = SqlxResult<bool>> + Send;

    /// Delete row `id`. Returns whether a row matched.
    fn delete(&self, id: i64) -> impl Future<Output = SqlxResult<bool>> + Send;
}

/// [`Repository`] backed by a shared `SqlitePool`.
///
/// ```ignore
/// let users = SqlxRepository::<User>::new(pool.clone());
/// let alice = users.insert(&UserIn { .. }).await?;
/// ```
pub struct SqlxRepository<T> {
    pool: SqlitePool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> SqlxRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// A [`QueryBuilder`] over this entity's table, for [`Repository::find_where`].
    pub fn filter(&self) -> QueryBuilder {
        QueryBuilder::new(T::table_name())
    }
}

impl<T> Clone for SqlxRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> for SqlxRepository<T> {
    async fn find_all(&self) -> SqlxResult<Vec<T>> {
        self.find_where(self.filter()).await
    }

    async fn find_where(&self, filter: QueryBuilder) -> SqlxResult<Vec<T>> {
        let (sql, params) = filter
            .order_by(T::id_column(), true)
            .build_select(T::columns())?;

        let mut query = sqlx::query_as::<_, T>(&sql);
        for param in params {
            query = query.bind(param);
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn find_by_id(&self, id: i64) -> SqlxResult<Option<T>> {
        let (sql, _) = self
            .filter()
            .where_eq(T::id_column(), id)
            .build_select(T::columns())?;

        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn insert(&self, record: &T::Record) -> SqlxResult<T> {
        let columns = <T::Record as Record>::columns();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::table_name(),
            columns.join(", "),
            vec!["?"; columns.len()].join(", "),
        );

        let result = record
            .bind(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;

        let id = result.last_insert_rowid();
        tracing::debug!(table = T::table_name(), id, "row inserted");
        Ok(T::from_record(id, record))
    }

    async fn update(&self, id: i64, record: &T::Record) -> SqlxResult<bool> {
        let assignments: Vec<String> = <T::Record as Record>::columns()
            .iter()
            .map(|col| format!("{col} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            T::table_name(),
            assignments.join(", "),
            T::id_column(),
        );

        let result = record
            .bind(sqlx::query(&sql))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> SqlxResult<bool> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", T::table_name(), T::id_column());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use crate::models::{User, UserIn};
    use crate::schema;

    async fn users() -> SqlxRepository<User> {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        schema::create_all(&pool).await.unwrap();
        SqlxRepository::new(pool)
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = users().await;
        let a = repo.insert(&UserIn::fake(0)).await.unwrap();
        let b = repo.insert(&UserIn::fake(1)).await.unwrap();
        assert!(b.id() > a.id());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        assert_eq!(repo.find_by_id(a.id()).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn update_and_delete_report_whether_a_row_matched() {
        let repo = users().await;
        let user = repo.insert(&UserIn::fake(0)).await.unwrap();

        assert!(repo.update(user.id, &UserIn::fake(5)).await.unwrap());
        assert!(!repo.update(user.id + 100, &UserIn::fake(5)).await.unwrap());
        assert_eq!(repo.find_by_id(user.id).await.unwrap().unwrap().first_name, "user5");

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_where_binds_integer_conditions() {
        let repo = users().await;
        let mut ids = Vec::new();
        for i in 0..3 {
            ids.push(repo.insert(&UserIn::fake(i)).await.unwrap().id);
        }
        let found = repo
            .find_where(repo.filter().where_eq("id", ids[1]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last_name, "test1");
    }

    #[tokio::test]
    async fn bad_identifier_surfaces_as_database_error() {
        let repo = users().await;
        let err = repo
            .find_where(repo.filter().where_eq("id; --", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Database(_)));
    }

    #[tokio::test]
    async fn missing_table_is_a_database_error() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let repo = SqlxRepository::<User>::new(pool);
        assert!(matches!(repo.find_all().await, Err(DataError::Database(_))));
    }
}
