//! Main scraper context for the listing site.
//!
//! Owns the fetcher (and with it the page cache) plus the site settings,
//! and wires the extraction steps into the home, list, detail, search and
//! statistics views. Fetch failures are logged and turn into empty results;
//! nothing here returns an error to the caller.

use crate::categorize::categorize_anime;
use crate::clean::clean_title;
use crate::dedupe::remove_duplicates;
use crate::detail::extract_details;
use crate::error::{Result, ScrapeError};
use crate::extract::extract_anime_links;
use crate::fetch::{Fetcher, HttpTransport, Transport};
use crate::search::{filter_by_letter, search_records, sort_by_title};
use scraper::Html;
use shared::config::ScraperConfig;
use shared::{AnimeDetail, AnimeRecord, CategorizedSet, ScrapeStatistics};
use tracing::{info, warn};
use url::Url;

/// Scraper for a single anime listing site
pub struct AnimeScraper {
    fetcher: Fetcher,
    config: ScraperConfig,
    site_domain: String,
}

impl AnimeScraper {
    /// Create a scraper backed by a real HTTP client
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a scraper around any transport
    pub fn with_transport(config: ScraperConfig, transport: impl Transport + 'static) -> Result<Self> {
        let site_domain = Url::parse(&config.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .ok_or_else(|| ScrapeError::InvalidUrl(config.base_url.clone()))?;

        info!(base_url = %config.base_url, site_domain = %site_domain, "Scraper initialized");

        Ok(Self {
            fetcher: Fetcher::new(transport),
            config,
            site_domain,
        })
    }

    /// Fetch a page, logging and swallowing failures
    async fn page(&self, url: &str) -> Option<String> {
        match self.fetcher.fetch(url, true).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Page unavailable, returning empty result");
                None
            }
        }
    }

    /// Extract, clean and deduplicate the anime links of a page
    fn unique_records(&self, html: &str) -> Vec<AnimeRecord> {
        let document = Html::parse_document(html);
        let records = extract_anime_links(&document, &self.site_domain)
            .into_iter()
            .map(|record| AnimeRecord {
                title: clean_title(&record.title),
                url: record.url,
            })
            .collect();
        remove_duplicates(records)
    }

    /// Scrape the home page into ongoing, completed and movie buckets
    pub async fn home(&self) -> CategorizedSet {
        info!("Scraping home page");
        let Some(html) = self.page(&self.config.base_url).await else {
            return CategorizedSet::default();
        };

        let records = self.unique_records(&html);
        let unique = records.len();

        let mut categorized = categorize_anime(records);
        categorized.truncate(self.config.home_category_limit);

        info!(
            unique = unique,
            ongoing = categorized.ongoing.len(),
            completed = categorized.completed.len(),
            movies = categorized.movies.len(),
            "Found unique anime entries"
        );
        categorized
    }

    /// Scrape the complete anime list, optionally filtered by first letter
    pub async fn anime_list(&self, letter: Option<&str>) -> Vec<AnimeRecord> {
        let letter = letter.map(str::trim).filter(|l| !l.is_empty());
        info!(letter = letter.unwrap_or("all"), "Scraping anime list");

        let Some(html) = self.page(&self.config.list_url()).await else {
            return Vec::new();
        };

        let mut records = self.unique_records(&html);
        if let Some(letter) = letter {
            records = filter_by_letter(records, letter);
        }
        sort_by_title(&mut records);

        info!(count = records.len(), "Found anime entries");
        records
    }

    /// Scrape a single anime page; `None` when the page cannot be fetched
    pub async fn anime_details(&self, url: &str) -> Option<AnimeDetail> {
        info!(url = %url, "Scraping anime details");
        let html = self.page(url).await?;

        let details = extract_details(
            &Html::parse_document(&html),
            url,
            self.config.download_link_limit,
        );

        info!(
            title = %details.title,
            download_links = details.download_links.len(),
            genres = details.metadata.genre.len(),
            "Extracted anime details"
        );
        Some(details)
    }

    /// Search the complete list by title
    ///
    /// The list is re-derived on every call; the page cache keeps this to a
    /// single network request per process.
    pub async fn search(&self, query: &str) -> Vec<AnimeRecord> {
        info!(query = %query, "Searching");
        if query.trim().is_empty() {
            return Vec::new();
        }

        let all = self.anime_list(None).await;
        let results = search_records(&all, query, self.config.search_result_limit);

        info!(count = results.len(), "Found matching anime");
        results
    }

    /// Aggregate counts over the home and list views
    pub async fn statistics(&self) -> ScrapeStatistics {
        let home = self.home().await;
        let all = self.anime_list(None).await;

        ScrapeStatistics {
            total_anime: all.len(),
            ongoing_count: home.ongoing.len(),
            completed_count: home.completed.len(),
            movies_count: home.movies.len(),
            cache_size: self.fetcher.cache_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::cache::tests::StaticTransport;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const HOME: &str = r#"<html><body>
        <a href="https://meownime.ltd/genre/action/">Action</a>
        <a href="https://meownime.ltd/jujutsu-kaisen-movie-sub-indo/">Jujutsu Kaisen 0 Sub Indo</a>
        <a href="https://meownime.ltd/oshi-no-ko-s2-sub-indo/">Oshi no Ko Season 2</a>
        <a href="https://meownime.ltd/cowboy-bebop-sub-indo/">Cowboy Bebop Batch</a>
        <a href="https://meownime.ltd/cowboy-bebop-sub-indo/">cowboy bebop</a>
        <a href="https://meownime.ltd/dandadan-subtitle-indonesia/">Dandadan 2024</a>
        <a href="https://elsewhere.net/naruto-sub-indo/">Naruto</a>
    </body></html>"#;

    const LIST: &str = r#"<html><body>
        <a href="https://meownime.ltd/naruto-shippuden-sub-indo/">Naruto Shippuden</a>
        <a href="https://meownime.ltd/boruto-sub-indo/">Boruto: Naruto Next</a>
        <a href="https://meownime.ltd/naruto-sub-indo/">Naruto</a>
        <a href="https://meownime.ltd/bleach-sub-indo/">Bleach</a>
        <a href="https://meownime.ltd/anime-list-baru/">Anime List</a>
    </body></html>"#;

    const DETAIL: &str = r#"<html><head><title>Naruto | Meownime</title></head><body>
        <h1 class="entry-title">Naruto Sub Indo</h1>
        <div class="entry-content">
            <p>Naruto Uzumaki is a young ninja who seeks recognition from his peers.</p>
            <p>Download link below</p>
        </div>
        <div class="genre"><a>Action</a><a>Adventure</a></div>
        <p>Aired 2002</p>
        <a href="https://drive.google.com/file/d/naruto">Batch 720p</a>
    </body></html>"#;

    fn scraper() -> (AnimeScraper, StaticTransport) {
        let transport = StaticTransport::with_pages(&[
            ("https://meownime.ltd", 200, HOME),
            ("https://meownime.ltd/anime-list-baru", 200, LIST),
            ("https://meownime.ltd/naruto-sub-indo/", 200, DETAIL),
            ("https://meownime.ltd/broken-sub-indo/", 500, "oops"),
        ]);
        let scraper = AnimeScraper::with_transport(ScraperConfig::default(), transport.clone())
            .expect("default config is valid");
        (scraper, transport)
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ScraperConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(AnimeScraper::with_transport(config, StaticTransport::default()).is_err());
    }

    #[tokio::test]
    async fn test_home_categorizes_cleaned_unique_records() {
        let (scraper, _) = scraper();
        let home = scraper.home().await;

        assert_eq!(home.movies, vec![AnimeRecord::new(
            "Jujutsu Kaisen 0",
            "https://meownime.ltd/jujutsu-kaisen-movie-sub-indo/"
        )]);
        assert_eq!(
            home.ongoing.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["Oshi no Ko Season 2", "Dandadan 2024"]
        );
        assert_eq!(home.completed, vec![AnimeRecord::new(
            "Cowboy Bebop",
            "https://meownime.ltd/cowboy-bebop-sub-indo/"
        )]);
    }

    #[tokio::test]
    async fn test_home_caps_buckets() {
        let anchors: String = (0..30)
            .map(|i| format!(r#"<a href="https://meownime.ltd/show-{i}-sub-indo/">Completed Show {i}</a>"#))
            .collect();
        let transport = StaticTransport::with_pages(&[("https://meownime.ltd", 200, anchors.as_str())]);
        let scraper = AnimeScraper::with_transport(ScraperConfig::default(), transport)
            .expect("default config is valid");

        let home = scraper.home().await;
        assert_eq!(home.completed.len(), 20);
        assert_eq!(home.completed[0].title, "Completed Show 0");
    }

    #[tokio::test]
    async fn test_anime_list_sorted_and_filtered() {
        let (scraper, _) = scraper();

        let all = scraper.anime_list(None).await;
        assert_eq!(
            all.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["Bleach", "Boruto: Naruto Next", "Naruto", "Naruto Shippuden"]
        );

        let b = scraper.anime_list(Some("b")).await;
        assert_eq!(b.len(), 2);
        assert!(b.iter().all(|r| r.title.starts_with('B')));
    }

    #[tokio::test]
    async fn test_anime_list_with_trailing_slash_base_url() {
        let transport = StaticTransport::with_pages(&[("https://meownime.ltd/anime-list-baru", 200, LIST)]);
        let config = ScraperConfig {
            base_url: "https://meownime.ltd/".to_string(),
            ..Default::default()
        };
        let scraper = AnimeScraper::with_transport(config, transport.clone())
            .expect("base url with trailing slash is valid");

        assert_eq!(scraper.anime_list(None).await.len(), 4);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_ranks_and_reuses_cache() {
        let (scraper, transport) = scraper();

        let results = scraper.search("naruto").await;
        assert_eq!(
            results.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["Naruto", "Naruto Shippuden", "Boruto: Naruto Next"]
        );

        scraper.search("bleach").await;
        assert_eq!(transport.call_count(), 1);

        assert!(scraper.search("   ").await.is_empty());
    }

    #[tokio::test]
    async fn test_anime_details() {
        let (scraper, _) = scraper();
        let details = scraper
            .anime_details("https://meownime.ltd/naruto-sub-indo/")
            .await
            .expect("detail page is served");

        assert_eq!(details.title, "Naruto");
        assert_eq!(
            details.synopsis,
            "Naruto Uzumaki is a young ninja who seeks recognition from his peers."
        );
        assert_eq!(details.download_links.len(), 1);
        assert_eq!(details.metadata.genre, vec!["Action", "Adventure"]);
        assert_eq!(details.metadata.year.as_deref(), Some("2002"));
    }

    #[tokio::test]
    async fn test_fetch_failures_degrade_to_empty() {
        let transport = StaticTransport::default();
        let scraper = AnimeScraper::with_transport(ScraperConfig::default(), transport)
            .expect("default config is valid");

        assert_eq!(scraper.home().await, CategorizedSet::default());
        assert!(scraper.anime_list(None).await.is_empty());
        assert!(scraper.search("naruto").await.is_empty());
        assert!(scraper
            .anime_details("https://meownime.ltd/broken-sub-indo/")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_non_success_detail_page_is_none() {
        let (scraper, _) = scraper();
        assert!(scraper
            .anime_details("https://meownime.ltd/broken-sub-indo/")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_statistics() {
        let (scraper, _) = scraper();
        let stats = scraper.statistics().await;

        assert_eq!(
            stats,
            ScrapeStatistics {
                total_anime: 4,
                ongoing_count: 2,
                completed_count: 1,
                movies_count: 1,
                cache_size: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();

        let list = format!(
            r#"<html><body>
                <a href="{base}/frieren-sub-indo/">Sousou no Frieren Sub Indo</a>
                <a href="{base}/faq/">Frequently Asked</a>
            </body></html>"#
        );

        Mock::given(method("GET"))
            .and(path("/anime-list-baru"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(list),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ScraperConfig {
            base_url: base.clone(),
            ..Default::default()
        };
        let scraper = AnimeScraper::new(config)?;

        let results = scraper.search("frieren").await;
        assert_eq!(
            results,
            vec![AnimeRecord::new("Sousou no Frieren", format!("{base}/frieren-sub-indo/"))]
        );
        assert_eq!(scraper.anime_list(None).await.len(), 1);

        Ok(())
    }
}
