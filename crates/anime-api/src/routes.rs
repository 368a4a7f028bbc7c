//! HTTP routes.
//!
//! Every endpoint is a thin wrapper over one [`AnimeScraper`] view; the
//! scraper (and its page cache) is shared by all requests.

use crate::error::{handle_panic, ApiError};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use meownime_scraper::AnimeScraper;
use serde::Deserialize;
use serde_json::Value;
use shared::{AnimeDetail, AnimeRecord, CategorizedSet, ScrapeStatistics};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub type SharedScraper = Arc<AnimeScraper>;

/// Build the router with all API endpoints
pub fn router(scraper: SharedScraper) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/home", get(home))
        .route("/api/anime-list", get(anime_list))
        .route("/api/anime-details", get(anime_details))
        .route("/api/search", get(search))
        .route("/api/statistics", get(statistics))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(scraper)
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    letter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailParams {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Treat an absent or empty parameter as missing
fn required(value: Option<String>, message: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParameter(message))
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn home(State(scraper): State<SharedScraper>) -> Json<CategorizedSet> {
    info!("API: Fetching home page data");
    let data = scraper.home().await;
    info!(total = data.total(), "API: Returning home data");
    Json(data)
}

async fn anime_list(
    Query(params): Query<ListParams>,
    State(scraper): State<SharedScraper>,
) -> Json<Vec<AnimeRecord>> {
    info!(letter = params.letter.as_deref().unwrap_or("all"), "API: Fetching anime list");
    let data = scraper.anime_list(params.letter.as_deref()).await;
    info!(count = data.len(), "API: Returning anime entries");
    Json(data)
}

async fn anime_details(
    Query(params): Query<DetailParams>,
    State(scraper): State<SharedScraper>,
) -> Result<Json<AnimeDetail>, ApiError> {
    let url = required(params.url, "URL parameter required")?;

    info!(url = %url, "API: Fetching anime details");
    match scraper.anime_details(&url).await {
        Some(details) => {
            info!(title = %details.title, "API: Successfully fetched details");
            Ok(Json(details))
        }
        None => {
            warn!(url = %url, "API: Failed to fetch anime details");
            Err(ApiError::NotFound("Failed to fetch anime details".to_string()))
        }
    }
}

async fn search(
    Query(params): Query<SearchParams>,
    State(scraper): State<SharedScraper>,
) -> Result<Json<Vec<AnimeRecord>>, ApiError> {
    let query = required(params.q, "Query parameter 'q' required")?;

    info!(query = %query, "API: Searching");
    let results = scraper.search(&query).await;
    info!(count = results.len(), "API: Found search results");
    Ok(Json(results))
}

async fn statistics(State(scraper): State<SharedScraper>) -> Json<ScrapeStatistics> {
    info!("API: Fetching statistics");
    Json(scraper.statistics().await)
}
