use sqlx::SqlitePool;

/// `CREATE TABLE` statements, in dependency order.
///
/// Column widths mirror the input validation limits; SQLite does not enforce
/// them itself.
pub const TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name VARCHAR(32),
        last_name VARCHAR(32),
        email VARCHAR(128),
        password VARCHAR(32)
    )",
    "CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(32),
        description VARCHAR(256),
        price FLOAT
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users (id),
        item_id INTEGER REFERENCES items (id),
        order_date DATETIME,
        status VARCHAR(32)
    )",
];

/// Create any missing tables. Existing tables are left untouched.
pub async fn create_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}
