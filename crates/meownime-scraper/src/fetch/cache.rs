//! In-memory page cache and the caching fetcher.
//!
//! Pages are cached for the lifetime of the process, keyed by the exact URL
//! string. There is no eviction and no expiry.

use super::client::{validate_url, Transport};
use crate::error::{Result, ScrapeError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

/// Process-lifetime mapping of URL to page body
#[derive(Debug, Default)]
pub struct PageCache {
    pages: Mutex<HashMap<String, String>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map of complete bodies.
        self.pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a cached page if it exists
    pub fn get(&self, url: &str) -> Option<String> {
        let page = self.lock().get(url).cloned();
        if page.is_some() {
            debug!(url = url, "Cache hit");
        } else {
            debug!(url = url, "Cache miss");
        }
        page
    }

    /// Store a page body
    pub fn set(&self, url: &str, body: String) {
        self.lock().insert(url.to_string(), body);
        debug!(url = url, "Cache stored");
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transport with a page cache in front of it
pub struct Fetcher {
    transport: Box<dyn Transport>,
    cache: PageCache,
}

impl Fetcher {
    /// Create a new fetcher around a transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            cache: PageCache::new(),
        }
    }

    /// Fetch a page body, consulting the cache first when `use_cache` is set
    ///
    /// A miss performs exactly one GET. Successful bodies are cached under
    /// the exact URL; transport errors and non-2xx statuses are returned
    /// as errors and nothing is cached.
    pub async fn fetch(&self, url: &str, use_cache: bool) -> Result<String> {
        if use_cache {
            if let Some(body) = self.cache.get(url) {
                info!(url = %url, "Using cached content");
                return Ok(body);
            }
        }

        validate_url(url)?;

        info!(url = %url, "Fetching");
        let response = match self.transport.get(url).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %url, error = %e, "Error fetching page");
                return Err(e);
            }
        };

        if !response.is_success() {
            error!(url = %url, status = response.status, "Error fetching page");
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        self.cache.set(url, response.body.clone());
        info!(url = %url, bytes = response.body.len(), "Successfully fetched and cached");

        Ok(response.body)
    }

    /// Number of cached pages
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
