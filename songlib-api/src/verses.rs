//! Lyrics verse splitting

/// Blank line between verses
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Split lyrics into verses on every blank line
///
/// A purely structural split: no trimming, and empty text yields one empty
/// verse.
pub fn split_verses(text: &str) -> Vec<String> {
    text.split(VERSE_SEPARATOR).map(String::from).collect()
}
