//! Database initialization
//!
//! Opens the SQLite store and creates the schema if needed. Safe to run on
//! every startup.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open (creating if missing) the database file at `db_path`
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = connect(&crate::config::sqlite_url(db_path)).await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    Ok(pool)
}

/// Busy wait before a locked database is reported as an error
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connect to `database_url` and ensure the schema exists
///
/// Pragmas are part of the connect options, so every pooled connection
/// carries them.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .foreign_keys(true)
        // Readers proceed while an insert is in flight
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    create_persons_table(&pool).await?;

    Ok(pool)
}

/// Create the persons table
///
/// `age` is written once at insert time. `created_at` is a UTC RFC 3339
/// timestamp so `strftime` can bucket it by month.
pub async fn create_persons_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            age INTEGER NOT NULL CHECK (age >= 0),
            profession TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL,
            photo_url TEXT,
            created_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_persons_created_at ON persons(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}
