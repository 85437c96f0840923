//! Database initialization
//!
//! Opens the connection pool and creates the `songs` table and its indexes.
//! Schema creation is idempotent and runs on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

/// Open the database named by `database_url` and ensure the schema exists
///
/// Use `mode=rwc` in a file URL to create the file on first run.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Connected to database: {}", database_url);

    // WAL lets readers proceed while a write is in flight
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with the schema applied
///
/// Each SQLite in-memory connection is its own database, so the pool is
/// capped at one connection.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create the `songs` table and its lookup indexes
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // AUTOINCREMENT: ids of deleted songs are never handed out again
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_group TEXT NOT NULL DEFAULT '',
            song_name TEXT NOT NULL DEFAULT '',
            release_date TEXT NOT NULL DEFAULT '',
            text TEXT NOT NULL DEFAULT '',
            links TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_song_group ON songs(song_group)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_song_name ON songs(song_name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_release_date ON songs(release_date)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();

        // Second run must not fail on existing table/indexes
        create_schema(&pool).await.unwrap();

        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('songs')")
            .fetch_all(&pool)
            .await
            .unwrap();

        assert_eq!(
            columns,
            vec!["id", "song_group", "song_name", "release_date", "text", "links"]
        );
    }

    #[tokio::test]
    async fn test_lookup_indexes_exist() {
        let pool = connect_in_memory().await.unwrap();

        let indexes: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'songs' AND name LIKE 'idx_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            indexes,
            vec![
                "idx_songs_release_date",
                "idx_songs_song_group",
                "idx_songs_song_name",
            ]
        );
    }
}
