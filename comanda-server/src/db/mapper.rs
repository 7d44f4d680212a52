//! Record Mapper
//!
//! Generic find/save/update/delete for any [`Record`], driven by the
//! table's [`TableSchema`]. Repositories own a `RecordMapper` and add their
//! table-specific queries next to it.
//!
//! Insert-then-reload and update-then-reload are two round trips, not a
//! transaction.

use std::marker::PhantomData;
use std::sync::Arc;

use shared::models::Estado;
use shared::util::{advance_millis, now_millis};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};

use super::DbService;
use super::repository::{RepoError, RepoResult};
use super::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;
type SqliteQueryAs<'q, R> = sqlx::query::QueryAs<'q, Sqlite, R, SqliteArguments<'q>>;

/// A value bound into a generated statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Estado> for SqlValue {
    fn from(value: Estado) -> Self {
        SqlValue::Text(value.as_str().to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Primary key lookup: a scalar for single-column keys, column/value pairs
/// for composite keys
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKey {
    Single(i64),
    Composite(Vec<(String, SqlValue)>),
}

impl RecordKey {
    pub fn composite<C, V>(pairs: impl IntoIterator<Item = (C, V)>) -> Self
    where
        C: Into<String>,
        V: Into<SqlValue>,
    {
        RecordKey::Composite(
            pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self {
        RecordKey::Single(id)
    }
}

/// A plain data record persisted in one table
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + Sized {
    /// Table name, as used in hand-written queries and logs
    const TABLE: &'static str;
    /// Insert column override (timestamps are appended by the mapper)
    const INSERTABLE: Option<&'static [&'static str]> = None;
    /// Update column override (update timestamp is appended by the mapper)
    const UPDATABLE: Option<&'static [&'static str]> = None;

    fn table(schema: &Schema) -> &TableSchema;

    /// Current value of `column`, `None` if the record has no such column
    fn column_value(&self, column: &str) -> Option<SqlValue>;

    /// Last update timestamp held on the instance
    fn updated_at(&self) -> i64;
}

/// Generic persistence for records of type `R`
pub struct RecordMapper<R> {
    pool: SqlitePool,
    schema: Arc<Schema>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordMapper<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordMapper<R> {
    pub fn new(db: &DbService) -> Self {
        Self {
            pool: db.pool.clone(),
            schema: db.schema.clone(),
            _record: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &TableSchema {
        R::table(&self.schema)
    }

    /// Every row, in store order
    pub async fn find_all(&self) -> RepoResult<Vec<R>> {
        let sql = self.table().select_all_sql();
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn find_one(&self, key: impl Into<RecordKey>) -> RepoResult<Option<R>> {
        let values = self.key_values(key.into())?;
        self.fetch_by_key(values).await
    }

    /// Insert `record` and return the stored row
    pub async fn save(&self, record: &R) -> RepoResult<R> {
        let table = self.table();
        let mut columns = table.insertable(R::INSERTABLE);
        let mut values = self.values_of(record, &columns)?;

        let now = now_millis();
        columns.push(DATA_CRIACAO.to_string());
        values.push(now.into());
        columns.push(DATA_ATUALIZACAO.to_string());
        values.push(now.into());

        let sql = table.insert_sql(&columns);
        let result = bind_query(sqlx::query(&sql), values)
            .execute(&self.pool)
            .await?;

        let key = if table.is_composite() {
            self.key_of(record)?
        } else {
            vec![SqlValue::Integer(result.last_insert_rowid())]
        };
        self.fetch_by_key(key).await?.ok_or_else(|| {
            RepoError::Database(format!("Failed to reload {} after insert", table.name()))
        })
    }

    /// Write the updatable columns of `record`, keyed by its primary key
    ///
    /// The update timestamp always moves forward, even within one millisecond.
    pub async fn update(&self, record: &R) -> RepoResult<R> {
        let table = self.table();
        let mut columns = table.updatable(R::UPDATABLE);
        let mut values = self.values_of(record, &columns)?;

        columns.push(DATA_ATUALIZACAO.to_string());
        values.push(advance_millis(record.updated_at()).into());

        let key = self.key_of(record)?;
        values.extend(key.iter().cloned());

        let sql = table.update_sql(&columns);
        let result = bind_query(sqlx::query(&sql), values)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("{} {:?}", table.name(), key)));
        }

        self.fetch_by_key(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{} vanished during update", table.name())))
    }

    /// Delete the row behind `record`; the detached instance is handed back
    pub async fn delete(&self, record: R) -> RepoResult<R> {
        let table = self.table();
        let key = self.key_of(&record)?;
        let sql = table.delete_sql();
        let result = bind_query(sqlx::query(&sql), key.clone())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("{} {:?}", table.name(), key)));
        }
        Ok(record)
    }

    async fn fetch_by_key(&self, key: Vec<SqlValue>) -> RepoResult<Option<R>> {
        let sql = self.table().select_one_sql();
        let row = bind_query_as(sqlx::query_as::<_, R>(&sql), key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Key values in primary-key order
    fn key_values(&self, key: RecordKey) -> RepoResult<Vec<SqlValue>> {
        let table = self.table();
        let primary_key = table.primary_key();
        match key {
            RecordKey::Single(id) if primary_key.len() == 1 => Ok(vec![SqlValue::Integer(id)]),
            RecordKey::Single(_) => Err(RepoError::Validation(format!(
                "{} needs a composite key ({})",
                table.name(),
                primary_key.join(", ")
            ))),
            RecordKey::Composite(pairs) => primary_key
                .iter()
                .map(|column| {
                    pairs
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, value)| value.clone())
                        .ok_or_else(|| {
                            RepoError::Validation(format!(
                                "Missing key column {column} for {}",
                                table.name()
                            ))
                        })
                })
                .collect(),
        }
    }

    fn key_of(&self, record: &R) -> RepoResult<Vec<SqlValue>> {
        self.values_of(record, self.table().primary_key())
    }

    fn values_of(&self, record: &R, columns: &[String]) -> RepoResult<Vec<SqlValue>> {
        columns
            .iter()
            .map(|column| {
                record.column_value(column).ok_or_else(|| {
                    RepoError::Validation(format!(
                        "{} has no column {column}",
                        self.table().name()
                    ))
                })
            })
            .collect()
    }
}

fn bind_query(query: SqliteQuery<'_>, values: Vec<SqlValue>) -> SqliteQuery<'_> {
    values.into_iter().fold(query, |query, value| match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Real(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
    })
}

fn bind_query_as<R>(query: SqliteQueryAs<'_, R>, values: Vec<SqlValue>) -> SqliteQueryAs<'_, R> {
    values.into_iter().fold(query, |query, value| match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Real(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
        assert_eq!(SqlValue::from(false), SqlValue::Integer(0));
        assert_eq!(SqlValue::from(Estado::Inativo), SqlValue::Text("I".into()));
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("sem cebola".to_string())),
            SqlValue::Text("sem cebola".into())
        );
    }

    #[test]
    fn test_composite_key_builder() {
        let key = RecordKey::composite([("Pedido_id", 3_i64), ("Produto_id", 8_i64)]);
        assert_eq!(
            key,
            RecordKey::Composite(vec![
                ("Pedido_id".to_string(), SqlValue::Integer(3)),
                ("Produto_id".to_string(), SqlValue::Integer(8)),
            ])
        );
    }

    #[tokio::test]
    async fn test_scalar_key_on_composite_table() {
        use shared::models::PedidoProduto;

        let db = DbService::in_memory().await.unwrap();
        let mapper = RecordMapper::<PedidoProduto>::new(&db);

        match mapper.find_one(5_i64).await {
            Err(RepoError::Validation(msg)) => {
                assert!(msg.contains("Pedido_id"), "unexpected message: {msg}");
                assert!(msg.contains("Produto_id"), "unexpected message: {msg}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_partial_composite_key() {
        use shared::models::PedidoProduto;

        let db = DbService::in_memory().await.unwrap();
        let mapper = RecordMapper::<PedidoProduto>::new(&db);

        let key = RecordKey::composite([("Pedido_id", 1_i64)]);
        match mapper.find_one(key).await {
            Err(RepoError::Validation(msg)) => {
                assert!(msg.contains("Produto_id"), "unexpected message: {msg}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
