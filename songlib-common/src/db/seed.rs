//! Built-in catalog songs inserted at startup

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

use super::models::SongInput;
use super::songs::{create_song, find_song};

fn initial_songs() -> Vec<SongInput> {
    vec![
        SongInput {
            group: "Muse".to_string(),
            title: "Supermassive Black Hole".to_string(),
            release_date: "2006-06-19".to_string(),
            text: "Ooh baby, don't you know I suffer?\n\nOoh you set my soul alight".to_string(),
            links: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
        },
        SongInput {
            group: "Nirvana".to_string(),
            title: "Smells Like Teen Spirit".to_string(),
            release_date: "1991-09-10".to_string(),
            text: "Load up on guns, bring your friends\n\nHello, hello, hello, how low".to_string(),
            links: "https://www.youtube.com/watch?v=hTWKbfoikeg".to_string(),
        },
        SongInput {
            group: "The Beatles".to_string(),
            title: "Hey Jude".to_string(),
            release_date: "1968-08-26".to_string(),
            text: "Hey Jude, don't make it bad\n\nHey Jude, don't be afraid".to_string(),
            links: "https://www.youtube.com/watch?v=A_MjCqQoLLA".to_string(),
        },
    ]
}

/// Insert the built-in songs that are not already present
///
/// A song counts as present when group, title and release date all match.
/// Returns the number of songs inserted.
pub async fn seed_initial_songs(pool: &SqlitePool) -> Result<usize> {
    let mut inserted = 0;

    for song in initial_songs() {
        if find_song(pool, &song.group, &song.title, &song.release_date)
            .await?
            .is_some()
        {
            info!("Song '{}' already exists in database", song.title);
            continue;
        }

        let title = song.title.clone();
        let created = create_song(pool, song).await?;
        info!("Song '{}' added to database (id {})", title, created.id);
        inserted += 1;
    }

    Ok(inserted)
}
