//! Tests for database bootstrap against a file-backed SQLite database

use songlib_common::db::{init_database, seed_initial_songs};
use songlib_common::db::songs::{create_song, get_song};
use songlib_common::db::SongInput;
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("songs.db").display())
}

#[tokio::test]
async fn test_database_created_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("songs.db");
    assert!(!db_path.exists());

    let pool = init_database(&database_url(&dir)).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    let pool = init_database(&url).await.unwrap();
    let created = create_song(
        &pool,
        SongInput {
            group: "Muse".to_string(),
            title: "Hysteria".to_string(),
            ..SongInput::default()
        },
    )
    .await
    .unwrap();
    pool.close().await;

    let reopened = init_database(&url).await.unwrap();
    assert_eq!(get_song(&reopened, created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_seed_across_restarts() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    let pool = init_database(&url).await.unwrap();
    assert_eq!(seed_initial_songs(&pool).await.unwrap(), 3);
    pool.close().await;

    let reopened = init_database(&url).await.unwrap();
    assert_eq!(seed_initial_songs(&reopened).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unreachable_database_fails() {
    let result = init_database("sqlite:///nonexistent-dir/songs.db?mode=ro").await;
    assert!(result.is_err());
}
