//! External capability providers
//!
//! The pipeline talks to two external services: the media catalog (search, discovery,
//! details, watch providers) and a text generation model (interest expansion and
//! justifications). Each is modeled as a trait so the pipeline can run against the real
//! HTTP adapters, a null implementation when a service is not configured, or mocks in tests.

use crate::{
    error::{AppError, AppResult},
    models::{CatalogDetails, CatalogItem, MediaKind, WatchProviders},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::GeminiProvider;
pub use tmdb::TmdbProvider;

/// Parameters for a genre-based discovery request
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    /// Genres OR-combined by the catalog
    pub genre_ids: Vec<u32>,
    pub kind: MediaKind,
    pub locale: String,
    pub country: String,
    pub sort_by_popularity: bool,
    pub min_vote_count: u32,
    pub page: u32,
}

/// Trait for media catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Free-text search across movies and series
    async fn search_multi(
        &self,
        query: &str,
        locale: &str,
        country: &str,
        page: u32,
    ) -> AppResult<Vec<CatalogItem>>;

    /// Genre-based discovery for a single media kind
    async fn discover_by_genre(&self, query: DiscoverQuery) -> AppResult<Vec<CatalogItem>>;

    /// Kind-specific details including regional release or rating records
    async fn get_details(&self, id: u64, kind: MediaKind, locale: &str) -> AppResult<CatalogDetails>;

    /// Watch providers for every country the title is offered in
    async fn get_watch_providers(&self, id: u64, kind: MediaKind) -> AppResult<WatchProviders>;

    /// Whether the provider is configured to reach its service at all
    fn is_available(&self) -> bool;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for generative text providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for a single prompt
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    fn is_available(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Catalog used when no catalog service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCatalog;

#[async_trait::async_trait]
impl CatalogProvider for NullCatalog {
    async fn search_multi(&self, _: &str, _: &str, _: &str, _: u32) -> AppResult<Vec<CatalogItem>> {
        Err(unconfigured("catalog"))
    }

    async fn discover_by_genre(&self, _: DiscoverQuery) -> AppResult<Vec<CatalogItem>> {
        Err(unconfigured("catalog"))
    }

    async fn get_details(&self, _: u64, _: MediaKind, _: &str) -> AppResult<CatalogDetails> {
        Err(unconfigured("catalog"))
    }

    async fn get_watch_providers(&self, _: u64, _: MediaKind) -> AppResult<WatchProviders> {
        Err(unconfigured("catalog"))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "null_catalog"
    }
}

/// Text generator used when no language model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTextGenerator;

#[async_trait::async_trait]
impl TextGenerator for NullTextGenerator {
    async fn generate(&self, _: &str) -> AppResult<String> {
        Err(unconfigured("text generation"))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "null_text_generator"
    }
}

fn unconfigured(service: &str) -> AppError {
    AppError::Unavailable(format!("{} service is not configured", service))
}
