use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

/// A plain `sqlx::query` against SQLite, before any `bind`.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// The column values written by an insert or a full-row update.
///
/// `columns()` and `bind()` must agree on order.
pub trait Record: Send + Sync {
    fn columns() -> &'static [&'static str];

    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// A table row type with a generated integer primary key.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    type Record: Record;

    fn table_name() -> &'static str;

    fn id_column() -> &'static str {
        "id"
    }

    /// Every selected column, id first.
    fn columns() -> &'static [&'static str];

    fn id(&self) -> i64;

    /// The row as it reads back after writing `record` under `id`.
    fn from_record(id: i64, record: &Self::Record) -> Self;
}
