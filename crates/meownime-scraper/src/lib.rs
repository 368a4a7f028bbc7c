//! Meownime scraper library.
//!
//! Fetches pages from the meownime anime listing site and turns their markup
//! into categorized, deduplicated and ranked anime records, detail pages
//! and download links.

pub mod categorize;
pub mod clean;
pub mod dedupe;
pub mod detail;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod search;
pub mod site;

pub use error::{Result, ScrapeError};
pub use fetch::{Fetcher, HttpTransport, PageCache, Transport, TransportResponse};
pub use site::AnimeScraper;
