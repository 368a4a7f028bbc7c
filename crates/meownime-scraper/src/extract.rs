//! Anime link extraction.
//!
//! Scans every `a[href]` in a document and keeps the anchors that point at
//! an anime entry on the site, in document order.

use crate::html::element_text;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use shared::AnimeRecord;
use tracing::debug;

/// Path segments that mark an actual anime entry
pub const CONTENT_PATH_MARKERS: &[&str] = &["sub-indo", "subtitle-indonesia"];

/// Path keywords of navigation and utility pages
pub const NON_CONTENT_PATHS: &[&str] = &["facebook", "faq", "genre", "jadwal", "anime-list"];

/// Raw titles must be longer than this many characters
pub const MIN_RAW_TITLE_CHARS: usize = 3;

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector must parse"));

/// Decide whether an anchor is an anime entry link
///
/// All of the following must hold: the href contains a content path
/// marker, the title is longer than three characters, the href references
/// `site_domain`, and the href contains no non-content keyword.
pub fn is_anime_link(title: &str, href: &str, site_domain: &str) -> bool {
    let href_lower = href.to_lowercase();

    CONTENT_PATH_MARKERS.iter().any(|m| href_lower.contains(m))
        && title.chars().count() > MIN_RAW_TITLE_CHARS
        && href_lower.contains(&site_domain.to_lowercase())
        && !NON_CONTENT_PATHS.iter().any(|skip| href_lower.contains(skip))
}

/// Extract (title, url) records for anime entry links
pub fn extract_anime_links(document: &Html, site_domain: &str) -> Vec<AnimeRecord> {
    let mut records = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }

        let title = element_text(&anchor);
        if is_anime_link(&title, href, site_domain) {
            records.push(AnimeRecord::new(title, href));
        }
    }

    debug!(count = records.len(), site_domain = site_domain, "Extracted anime links");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "meownime.ltd";

    fn page(anchors: &str) -> Html {
        Html::parse_document(&format!("<html><body>{anchors}</body></html>"))
    }

    #[test]
    fn test_keeps_content_links_in_document_order() {
        let document = page(
            r#"<a href="https://meownime.ltd/one-piece-sub-indo/">One Piece</a>
               <a href="https://meownime.ltd/">Home</a>
               <a href="https://meownime.ltd/bleach-subtitle-indonesia/">Bleach TYBW</a>"#,
        );

        let records = extract_anime_links(&document, SITE);
        assert_eq!(
            records,
            vec![
                AnimeRecord::new("One Piece", "https://meownime.ltd/one-piece-sub-indo/"),
                AnimeRecord::new("Bleach TYBW", "https://meownime.ltd/bleach-subtitle-indonesia/"),
            ]
        );
    }

    #[test]
    fn test_rejects_short_titles() {
        let document = page(
            r#"<a href="https://meownime.ltd/abc-sub-indo/">ABC</a>
               <a href="https://meownime.ltd/abcd-sub-indo/">ABCD</a>"#,
        );

        let records = extract_anime_links(&document, SITE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "ABCD");
    }

    #[test]
    fn test_rejects_foreign_domains() {
        let document = page(r#"<a href="https://other.site/naruto-sub-indo/">Naruto</a>"#);
        assert!(extract_anime_links(&document, SITE).is_empty());
    }

    #[test]
    fn test_rejects_navigation_paths() {
        for href in [
            "https://meownime.ltd/genre/action-sub-indo/",
            "https://meownime.ltd/jadwal-sub-indo/",
            "https://meownime.ltd/faq-sub-indo/",
            "https://meownime.ltd/anime-list-sub-indo/",
            "https://facebook.com/meownime.ltd/sub-indo",
        ] {
            assert!(!is_anime_link("Long Enough Title", href, SITE), "{href}");
        }
    }

    #[test]
    fn test_matching_is_case_insensitive_on_href() {
        assert!(is_anime_link(
            "Frieren",
            "https://MEOWNIME.LTD/Frieren-Sub-Indo/",
            SITE
        ));
        assert!(!is_anime_link(
            "Frieren",
            "https://meownime.ltd/GENRE/frieren-sub-indo/",
            SITE
        ));
    }

    #[test]
    fn test_skips_empty_href_and_text() {
        let document = page(
            r#"<a href="">Empty Href Anime</a>
               <a href="https://meownime.ltd/x-sub-indo/"><img src="x.png"></a>"#,
        );
        assert!(extract_anime_links(&document, SITE).is_empty());
    }
}
