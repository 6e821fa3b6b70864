//! TMDb catalog provider
//!
//! Search, discovery, details and watch-provider lookups against The Movie Database v3 API.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        ApiDetails, ApiListItem, ApiPage, ApiWatchProviders, CatalogDetails, CatalogItem,
        MediaKind, WatchProviders,
    },
    services::providers::{CatalogProvider, DiscoverQuery},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const INCLUDE_ADULT: &str = "false";
const SORT_BY_POPULARITY: &str = "popularity.desc";

/// Maps movie genre ids to the TV genre that covers them.
///
/// TMDb merges some movie genres into combined TV genres; ids without an entry are shared.
const SERIES_GENRE_EQUIVALENTS: &[(u32, u32)] = &[
    (12, 10759),    // Adventure -> Action & Adventure
    (28, 10759),    // Action -> Action & Adventure
    (14, 10765),    // Fantasy -> Sci-Fi & Fantasy
    (878, 10765),   // Science Fiction -> Sci-Fi & Fantasy
    (10752, 10768), // War -> War & Politics
];

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_key().map(str::to_string),
            config.tmdb_api_url.clone(),
        )
    }

    /// Genre ids for a discovery request of the given kind
    fn genre_ids_for(kind: MediaKind, genre_ids: &[u32]) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::with_capacity(genre_ids.len());
        for &id in genre_ids {
            let id = match kind {
                MediaKind::Movie => id,
                MediaKind::Series => SERIES_GENRE_EQUIVALENTS
                    .iter()
                    .find(|(movie_id, _)| *movie_id == id)
                    .map(|(_, series_id)| *series_id)
                    .unwrap_or(id),
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Performs a GET request against the API and deserializes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("TMDb API key is not configured".to_string()))?;

        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http_client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("api_key", api_key)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                "TMDb request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDb returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_multi(
        &self,
        query: &str,
        locale: &str,
        country: &str,
        page: u32,
    ) -> AppResult<Vec<CatalogItem>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let params = [
            ("query", query.to_string()),
            ("include_adult", INCLUDE_ADULT.to_string()),
            ("language", locale.to_string()),
            ("region", country.to_string()),
            ("page", page.to_string()),
        ];

        let response: ApiPage<ApiListItem> = self.get_json("/search/multi", &params).await?;
        let items: Vec<CatalogItem> = response
            .results
            .into_iter()
            .filter_map(|row| row.into_catalog_item(None))
            .collect();

        tracing::debug!(
            query = %query,
            page = page,
            results = items.len(),
            provider = "tmdb",
            "Multi search completed"
        );

        Ok(items)
    }

    async fn discover_by_genre(&self, query: DiscoverQuery) -> AppResult<Vec<CatalogItem>> {
        let genre_ids = Self::genre_ids_for(query.kind, &query.genre_ids);
        if genre_ids.is_empty() {
            return Err(AppError::InvalidInput(
                "Discovery requires at least one genre".to_string(),
            ));
        }

        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|");

        let mut params = vec![
            ("with_genres", with_genres.clone()),
            ("include_adult", INCLUDE_ADULT.to_string()),
            ("language", query.locale.clone()),
            ("region", query.country.clone()),
            ("vote_count.gte", query.min_vote_count.to_string()),
            ("page", query.page.to_string()),
        ];
        if query.sort_by_popularity {
            params.push(("sort_by", SORT_BY_POPULARITY.to_string()));
        }

        let path = format!("/discover/{}", query.kind.catalog_path());
        let response: ApiPage<ApiListItem> = self.get_json(&path, &params).await?;
        let items: Vec<CatalogItem> = response
            .results
            .into_iter()
            .filter_map(|row| row.into_catalog_item(Some(query.kind)))
            .collect();

        tracing::debug!(
            kind = %query.kind,
            genres = %with_genres,
            page = query.page,
            results = items.len(),
            provider = "tmdb",
            "Genre discovery completed"
        );

        Ok(items)
    }

    async fn get_details(&self, id: u64, kind: MediaKind, locale: &str) -> AppResult<CatalogDetails> {
        let append = match kind {
            MediaKind::Movie => "release_dates",
            MediaKind::Series => "content_ratings",
        };
        let params = [
            ("append_to_response", append.to_string()),
            ("language", locale.to_string()),
        ];

        let path = format!("/{}/{}", kind.catalog_path(), id);
        let details: ApiDetails = self.get_json(&path, &params).await?;

        Ok(details.into())
    }

    async fn get_watch_providers(&self, id: u64, kind: MediaKind) -> AppResult<WatchProviders> {
        let path = format!("/{}/{}/watch/providers", kind.catalog_path(), id);
        let providers: ApiWatchProviders = self.get_json(&path, &[]).await?;

        Ok(providers.into())
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
