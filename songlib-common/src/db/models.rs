//! Database models

use serde::{Deserialize, Serialize};

/// A row of the `songs` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    #[serde(rename = "song_group")]
    pub group: String,
    #[serde(rename = "song_name")]
    pub title: String,
    pub release_date: String,
    /// Lyrics; verses are separated by a blank line
    pub text: String,
    pub links: String,
}

/// Song fields accepted from clients on create and update
///
/// `song_group` and `song_name` must be present in the JSON body. An `id`
/// field in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInput {
    #[serde(rename = "song_group")]
    pub group: String,
    #[serde(rename = "song_name")]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub links: String,
}

impl SongInput {
    /// Attach a store-assigned id
    pub fn into_song(self, id: i64) -> Song {
        Song {
            id,
            group: self.group,
            title: self.title,
            release_date: self.release_date,
            text: self.text,
            links: self.links,
        }
    }
}

/// Substring filters for listing songs
///
/// Matching is case-sensitive. An empty field matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: String,
    pub title: String,
    pub release_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_song_json_shape() {
        let song = Song {
            id: 7,
            group: "Muse".to_string(),
            title: "Uprising".to_string(),
            release_date: "2009-09-07".to_string(),
            text: "They will not force us".to_string(),
            links: "https://example.com/uprising".to_string(),
        };

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "song_group": "Muse",
                "song_name": "Uprising",
                "release_date": "2009-09-07",
                "text": "They will not force us",
                "links": "https://example.com/uprising",
            })
        );
    }

    #[test]
    fn test_input_requires_group_and_title() {
        let missing_title = serde_json::from_value::<SongInput>(json!({ "song_group": "Muse" }));
        assert!(missing_title.is_err());

        let missing_group = serde_json::from_value::<SongInput>(json!({ "song_name": "Uprising" }));
        assert!(missing_group.is_err());
    }

    #[test]
    fn test_input_optional_fields_default_empty() {
        let input: SongInput = serde_json::from_value(json!({
            "id": 99,
            "song_group": "Muse",
            "song_name": "Uprising",
        }))
        .unwrap();

        assert_eq!(input.release_date, "");
        assert_eq!(input.text, "");
        assert_eq!(input.links, "");

        let song = input.into_song(3);
        assert_eq!(song.id, 3);
        assert_eq!(song.group, "Muse");
    }
}
