//! Song store: point operations by id and the filtered, paginated listing

use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::models::{Song, SongFilter, SongInput};

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        group: row.get("song_group"),
        title: row.get("song_name"),
        release_date: row.get("release_date"),
        text: row.get("text"),
        links: row.get("links"),
    }
}

/// List songs matching every filter field, ordered by id
///
/// Filters are case-sensitive substrings (`instr`, unlike SQLite's
/// ASCII case-insensitive `LIKE`). Returns at most `limit` rows after
/// skipping `offset` matches.
pub async fn list_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Song>> {
    debug!(?filter, limit, offset, "Listing songs");

    let rows = sqlx::query(
        r#"
        SELECT id, song_group, song_name, release_date, text, links
        FROM songs
        WHERE instr(song_group, ?) > 0
          AND instr(song_name, ?) > 0
          AND instr(release_date, ?) > 0
        ORDER BY id ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&filter.group)
    .bind(&filter.title)
    .bind(&filter.release_date)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

/// Insert a new song; the store assigns the id
pub async fn create_song(pool: &SqlitePool, input: SongInput) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (song_group, song_name, release_date, text, links)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.group)
    .bind(&input.title)
    .bind(&input.release_date)
    .bind(&input.text)
    .bind(&input.links)
    .execute(pool)
    .await?;

    Ok(input.into_song(result.last_insert_rowid()))
}

/// Load a song by id
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Song> {
    let row = sqlx::query(
        r#"
        SELECT id, song_group, song_name, release_date, text, links
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref()
        .map(song_from_row)
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))
}

/// Overwrite every field of an existing song
///
/// Never inserts: an unknown id is `Error::NotFound`.
pub async fn update_song(pool: &SqlitePool, id: i64, input: SongInput) -> Result<Song> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET song_group = ?, song_name = ?, release_date = ?, text = ?, links = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.group)
    .bind(&input.title)
    .bind(&input.release_date)
    .bind(&input.text)
    .bind(&input.links)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("song {}", id)));
    }

    Ok(input.into_song(id))
}

/// Delete a song by id; an unknown id is `Error::NotFound`
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("song {}", id)));
    }

    Ok(())
}

/// Exact-match lookup on group, title and release date
pub async fn find_song(
    pool: &SqlitePool,
    group: &str,
    title: &str,
    release_date: &str,
) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT id, song_group, song_name, release_date, text, links
        FROM songs
        WHERE song_group = ? AND song_name = ? AND release_date = ?
        LIMIT 1
        "#,
    )
    .bind(group)
    .bind(title)
    .bind(release_date)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(song_from_row))
}
