use std::sync::Arc;

use crate::{
    config::Config,
    models::{ProviderDirectory, RecommendationReport, UserContext},
    services::{
        availability::AvailabilityFilter,
        catalog::CatalogClient,
        discovery::ProspectDiscoveryEngine,
        enrichment::DetailEnricher,
        interest_expander::InterestExpander,
        justification::JustificationGenerator,
        providers::{CatalogProvider, GeminiProvider, TextGenerator, TmdbProvider},
        selection::SuitabilitySelector,
    },
};

/// Runs the recommendation pipeline for one child
///
/// Discovery assembles candidates from the interest query, then each stage narrows or
/// decorates them: details and certification, platform availability, suitability, and
/// finally a justification per pick. Nothing in the pipeline fails; an unreachable
/// catalog or an exhausted search yields an empty report.
#[derive(Clone)]
pub struct Recommender {
    discovery: ProspectDiscoveryEngine,
    enricher: DetailEnricher,
    availability: AvailabilityFilter,
    selector: SuitabilitySelector,
    justifier: JustificationGenerator,
}

impl Recommender {
    pub fn new(
        config: &Config,
        catalog: Arc<dyn CatalogProvider>,
        generator: Arc<dyn TextGenerator>,
        directory: ProviderDirectory,
    ) -> Self {
        let catalog = CatalogClient::new(catalog);

        Self {
            discovery: ProspectDiscoveryEngine::new(
                catalog.clone(),
                InterestExpander::new(Arc::clone(&generator)),
            ),
            enricher: DetailEnricher::new(catalog.clone()),
            availability: AvailabilityFilter::new(catalog, directory),
            selector: SuitabilitySelector::new(config.recommendation_limit()),
            justifier: JustificationGenerator::new(generator),
        }
    }

    /// Wires the TMDb and Gemini adapters from configuration
    pub fn from_config(config: &Config) -> Self {
        let catalog = TmdbProvider::from_config(config);
        let generator = GeminiProvider::from_config(config);

        tracing::info!(
            catalog_available = catalog.is_available(),
            generator_available = generator.is_available(),
            country = %config.target_country,
            locale = %config.target_locale,
            "Recommender configured"
        );

        Self::new(config, Arc::new(catalog), Arc::new(generator), ProviderDirectory::new())
    }

    pub async fn recommend(&self, context: &UserContext) -> RecommendationReport {
        tracing::info!(
            age = context.age(),
            interests = %context.interests(),
            platforms = ?context.platforms(),
            "Starting recommendation run"
        );

        let discovery = self.discovery.discover(context).await;
        if discovery.candidates.is_empty() {
            tracing::info!("Discovery found nothing, skipping remaining stages");
            return RecommendationReport::empty(context);
        }

        let enriched = self.enricher.enrich(discovery.candidates, context).await;
        let tagged = self.availability.tag(enriched, context).await;
        let selected = self
            .selector
            .select(tagged, context, discovery.fallback_engaged);
        let recommendations = self.justifier.justify(selected, context).await;

        tracing::info!(
            recommendations = recommendations.len(),
            fallback_engaged = discovery.fallback_engaged,
            "Recommendation run finished"
        );

        RecommendationReport::new(context, recommendations, discovery.fallback_engaged)
    }
}
