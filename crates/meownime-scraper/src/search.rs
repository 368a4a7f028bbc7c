//! Title search and ranking.

use shared::AnimeRecord;

pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Filter by case-insensitive substring and rank the matches
///
/// Titles starting with the query come first; within each tier shorter
/// titles come first and ties keep input order. Blank queries match
/// nothing.
pub fn search_records(records: &[AnimeRecord], query: &str, limit: usize) -> Vec<AnimeRecord> {
    let query_lower = query.to_lowercase().trim().to_string();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(bool, usize, &AnimeRecord)> = records
        .iter()
        .filter_map(|record| {
            let title_lower = record.title.to_lowercase();
            title_lower.contains(&query_lower).then(|| {
                (
                    !title_lower.starts_with(&query_lower),
                    record.title.chars().count(),
                    record,
                )
            })
        })
        .collect();

    results.sort_by_key(|(not_prefix, len, _)| (*not_prefix, *len));

    results
        .into_iter()
        .take(limit)
        .map(|(_, _, record)| record.clone())
        .collect()
}

/// Keep records whose title starts with `letter`, case-insensitively
pub fn filter_by_letter(records: Vec<AnimeRecord>, letter: &str) -> Vec<AnimeRecord> {
    let letter = letter.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.title.to_lowercase().starts_with(&letter))
        .collect()
}

/// Sort alphabetically on the lowercased title
pub fn sort_by_title(records: &mut [AnimeRecord]) {
    records.sort_by_cached_key(|record| record.title.to_lowercase());
}
