use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CatalogDetails, CatalogItem, MediaKind, WatchProviders},
    services::providers::{CatalogProvider, DiscoverQuery},
};

/// Fail-closed facade over a catalog provider
///
/// Every lookup returns `None` when the provider errors, so callers only ever see
/// "data" or "no data". Errors are logged here and go no further.
#[derive(Clone)]
pub struct CatalogClient {
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogClient {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub async fn search_multi(
        &self,
        query: &str,
        locale: &str,
        country: &str,
        page: u32,
    ) -> Option<Vec<CatalogItem>> {
        let result = self.provider.search_multi(query, locale, country, page).await;
        self.fail_closed("search_multi", result)
    }

    pub async fn discover_by_genre(&self, query: DiscoverQuery) -> Option<Vec<CatalogItem>> {
        let result = self.provider.discover_by_genre(query).await;
        self.fail_closed("discover_by_genre", result)
    }

    pub async fn get_details(&self, id: u64, kind: MediaKind, locale: &str) -> Option<CatalogDetails> {
        let result = self.provider.get_details(id, kind, locale).await;
        self.fail_closed("get_details", result)
    }

    pub async fn get_watch_providers(&self, id: u64, kind: MediaKind) -> Option<WatchProviders> {
        let result = self.provider.get_watch_providers(id, kind).await;
        self.fail_closed("get_watch_providers", result)
    }

    fn fail_closed<T>(&self, operation: &'static str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = operation,
                    provider = self.provider.name(),
                    "Catalog call failed, treating as no data"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockCatalogProvider;

    #[tokio::test]
    async fn test_errors_become_no_data() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_multi()
            .times(1)
            .returning(|_, _, _, _| Err(AppError::ExternalApi("503".to_string())));
        provider.expect_name().return_const("mock");

        let client = CatalogClient::new(Arc::new(provider));
        assert!(client.search_multi("robots", "pt-BR", "BR", 1).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_results_are_data() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_get_watch_providers()
            .times(1)
            .returning(|_, _| Ok(WatchProviders::new()));

        let client = CatalogClient::new(Arc::new(provider));
        let providers = client.get_watch_providers(7, MediaKind::Movie).await;
        assert_eq!(providers, Some(WatchProviders::new()));
    }
}
