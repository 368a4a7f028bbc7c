//! Detail page extraction.
//!
//! Every extractor here degrades to an empty or default value when the page
//! does not have the expected structure. A selector chain moves on to the
//! next selector when the current one yields nothing usable: no element for
//! genres, no non-empty text for the title, no qualifying paragraph for the
//! synopsis.

use crate::clean::clean_title;
use crate::html::{element_text, selectors, visible_text};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use shared::{AnimeDetail, AnimeMetadata, DownloadLink, LinkType};
use std::collections::HashSet;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Synopsis paragraphs must be longer than this many characters
pub const MIN_PARAGRAPH_CHARS: usize = 30;
pub const MAX_SYNOPSIS_PARAGRAPHS: usize = 3;
pub const MAX_SYNOPSIS_CHARS: usize = 500;
/// Paragraphs mentioning any of these are not synopsis text
pub const SYNOPSIS_STOP_WORDS: &[&str] = &["download", "link", "episode"];

pub const MAX_LINK_TEXT_CHARS: usize = 100;
pub const DEFAULT_DOWNLOAD_LINK_LIMIT: usize = 10;
pub const MAX_GENRES: usize = 5;

/// File-hosting domains, checked in this order; first match decides the type
pub const DOWNLOAD_DOMAINS: &[(&str, LinkType)] = &[
    ("drive.google.com", LinkType::GoogleDrive),
    ("mega.nz", LinkType::Mega),
    ("mediafire.com", LinkType::MediaFire),
    ("zippyshare.com", LinkType::ZippyShare),
    ("solidfiles.com", LinkType::SolidFiles),
    ("uptobox.com", LinkType::Uptobox),
];

static TITLE_SELECTORS: Lazy<Vec<Selector>> =
    Lazy::new(|| selectors(&["h1", ".entry-title", ".post-title", "title"]));

static SYNOPSIS_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    selectors(&[".entry-content p", ".post-content p", ".content p", "p"])
});

static GENRE_SELECTORS: Lazy<Vec<Selector>> =
    Lazy::new(|| selectors(&[".genre a", ".genres a", r#"[rel="tag"]"#]));

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector must parse"));

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("static regex must compile"));

static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bstatus\s*:\s*([a-z]+)").expect("static regex must compile")
});

static EPISODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:total\s+)?episodes?\s*:\s*(\d+)").expect("static regex must compile")
});

/// Extract everything shown for a single anime page
pub fn extract_details(document: &Html, url: &str, download_link_limit: usize) -> AnimeDetail {
    AnimeDetail {
        title: extract_title(document),
        synopsis: extract_synopsis(document),
        download_links: extract_download_links(document, download_link_limit),
        metadata: extract_metadata(document),
        url: url.to_string(),
    }
}

/// First non-empty title from the selector chain, cleaned
pub fn extract_title(document: &Html) -> String {
    TITLE_SELECTORS
        .iter()
        .filter_map(|selector| document.select(selector).next())
        .map(|element| element_text(&element))
        .find(|text| !text.is_empty())
        .map(|text| clean_title(&text))
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn is_synopsis_paragraph(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() > MIN_PARAGRAPH_CHARS
        && !SYNOPSIS_STOP_WORDS.iter().any(|word| lower.contains(word))
}

/// Join up to three qualifying paragraphs and truncate to 500 characters
///
/// Selectors are tried in order and the first one yielding at least one
/// qualifying paragraph wins. Matches that all fail the length or stop-word
/// filter count as no match, so the chain falls through.
pub fn extract_synopsis(document: &Html) -> String {
    let mut parts = Vec::new();

    for selector in SYNOPSIS_SELECTORS.iter() {
        parts = document
            .select(selector)
            .map(|p| element_text(&p))
            .filter(|text| is_synopsis_paragraph(text))
            .take(MAX_SYNOPSIS_PARAGRAPHS)
            .collect();

        if !parts.is_empty() {
            break;
        }
    }

    truncate_with_ellipsis(&parts.join(" "), MAX_SYNOPSIS_CHARS)
}

/// Keep the first `max_chars` characters, appending "..." if anything was cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Provider type of a download URL
pub fn determine_link_type(url: &str) -> LinkType {
    let url_lower = url.to_lowercase();
    DOWNLOAD_DOMAINS
        .iter()
        .find(|(domain, _)| url_lower.contains(domain))
        .map(|(_, link_type)| *link_type)
        .unwrap_or(LinkType::Other)
}

/// Anchors pointing at a known file host, unique by URL, capped at `limit`
pub fn extract_download_links(document: &Html, limit: usize) -> Vec<DownloadLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR) {
        if links.len() >= limit {
            break;
        }

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !DOWNLOAD_DOMAINS.iter().any(|(domain, _)| href.contains(domain)) {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }

        links.push(DownloadLink {
            text: element_text(&anchor).chars().take(MAX_LINK_TEXT_CHARS).collect(),
            url: href.to_string(),
            link_type: determine_link_type(href),
        });
    }

    links
}

/// Genre tags, first 19xx/20xx token, and status/episode labels
pub fn extract_metadata(document: &Html) -> AnimeMetadata {
    let genre = GENRE_SELECTORS
        .iter()
        .map(|selector| document.select(selector).collect::<Vec<_>>())
        .find(|elements| !elements.is_empty())
        .map(|elements| {
            elements
                .iter()
                .take(MAX_GENRES)
                .map(element_text)
                .collect()
        })
        .unwrap_or_default();

    let text = visible_text(document);

    AnimeMetadata {
        genre,
        year: first_year(&text),
        status: capture(&STATUS, &text),
        episodes: capture(&EPISODES, &text),
    }
}

/// First 4-digit token starting with 19 or 20
///
/// This may be any number on the page, not necessarily the release year.
pub fn first_year(text: &str) -> Option<String> {
    YEAR.find(text).map(|m| m.as_str().to_string())
}

fn capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
