//! Duplicate removal keyed on the normalized title.

use shared::AnimeRecord;
use std::collections::HashSet;

/// Keys must be longer than this many characters to survive
pub const MIN_KEY_CHARS: usize = 2;

/// Case-insensitive, trimmed title key
pub fn title_key(title: &str) -> String {
    title.to_lowercase().trim().to_string()
}

/// Remove duplicate anime entries, first occurrence wins
///
/// Records whose key is two characters or shorter are dropped outright.
pub fn remove_duplicates(records: Vec<AnimeRecord>) -> Vec<AnimeRecord> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter(|record| {
            let key = title_key(&record.title);
            key.chars().count() > MIN_KEY_CHARS && seen.insert(key)
        })
        .collect()
}
