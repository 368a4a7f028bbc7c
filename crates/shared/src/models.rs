//! Data models for the project.
//!
//! This module defines the records produced by the scraping pipeline:
//! list entries, categorized home page sections, detail pages and the
//! download links found on them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single anime entry: a title and the page it links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub title: String,
    pub url: String,
}

impl AnimeRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Home page category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ongoing,
    Completed,
    Movies,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ongoing, Category::Completed, Category::Movies];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ongoing => "ongoing",
            Category::Completed => "completed",
            Category::Movies => "movies",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Home page records bucketed by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedSet {
    pub ongoing: Vec<AnimeRecord>,
    pub completed: Vec<AnimeRecord>,
    pub movies: Vec<AnimeRecord>,
}

impl CategorizedSet {
    pub fn bucket(&self, category: Category) -> &[AnimeRecord] {
        match category {
            Category::Ongoing => &self.ongoing,
            Category::Completed => &self.completed,
            Category::Movies => &self.movies,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<AnimeRecord> {
        match category {
            Category::Ongoing => &mut self.ongoing,
            Category::Completed => &mut self.completed,
            Category::Movies => &mut self.movies,
        }
    }

    /// Keep at most `limit` records per bucket, earliest first
    pub fn truncate(&mut self, limit: usize) {
        for category in Category::ALL {
            self.bucket_mut(category).truncate(limit);
        }
    }

    pub fn total(&self) -> usize {
        self.ongoing.len() + self.completed.len() + self.movies.len()
    }
}

/// File-hosting provider of a download link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    #[serde(rename = "Google Drive")]
    GoogleDrive,
    #[serde(rename = "MEGA")]
    Mega,
    MediaFire,
    ZippyShare,
    SolidFiles,
    Uptobox,
    Other,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::GoogleDrive => write!(f, "Google Drive"),
            LinkType::Mega => write!(f, "MEGA"),
            LinkType::MediaFire => write!(f, "MediaFire"),
            LinkType::ZippyShare => write!(f, "ZippyShare"),
            LinkType::SolidFiles => write!(f, "SolidFiles"),
            LinkType::Uptobox => write!(f, "Uptobox"),
            LinkType::Other => write!(f, "Other"),
        }
    }
}

/// Download link found on a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub text: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

/// Light metadata scraped from a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeMetadata {
    pub genre: Vec<String>,
    pub year: Option<String>,
    pub status: Option<String>,
    pub episodes: Option<String>,
}

/// Everything extracted from a single anime page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub title: String,
    pub synopsis: String,
    pub download_links: Vec<DownloadLink>,
    pub metadata: AnimeMetadata,
    pub url: String,
}

/// Aggregate counts across the home and list views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeStatistics {
    pub total_anime: usize,
    pub ongoing_count: usize,
    pub completed_count: usize,
    pub movies_count: usize,
    pub cache_size: usize,
}

/// Results gathered during an interactive session, kept for export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<CategorizedSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<AnimeRecord>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, AnimeDetail>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.home.is_none() && self.list.is_none() && self.details.is_empty()
    }
}
