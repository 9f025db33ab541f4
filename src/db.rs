use std::{str::FromStr, time::Duration};

use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;
pub type OrmConn = DatabaseConnection;

/// Open the SQLite pool, creating the database file if it does not exist.
///
/// SQLite admits a single writer, so the pool holds one connection and
/// concurrent transactions queue on `acquire` instead of failing with
/// "database is locked". The connection is never recycled, which also keeps
/// an in-memory database alive. Code holding a transaction must run every
/// query through it.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a SeaORM connection sharing the sqlx pool.
pub fn create_orm_conn(pool: &DbPool) -> OrmConn {
    SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone())
}

/// Apply the SQL files in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Delete every row of every table. Used to isolate test runs.
pub async fn cleanup(pool: &DbPool) -> Result<()> {
    for table in [
        "users",
        "products",
        "products_in_carts",
        "carts",
        "reviews",
        "sqlite_sequence",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}
