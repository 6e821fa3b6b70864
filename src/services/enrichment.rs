use crate::{
    models::{CatalogDetails, EnrichedProspect, MediaKind, Prospect, UserContext, NOT_RATED},
    services::catalog::CatalogClient,
};

/// Theatrical, digital, physical and TV release types carry the ratings that matter at home
const RATED_RELEASE_TYPES: [u8; 4] = [3, 4, 5, 6];

/// Attaches details and a country-specific certification to each prospect
#[derive(Clone)]
pub struct DetailEnricher {
    catalog: CatalogClient,
}

impl DetailEnricher {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// Enriches prospects in order; prospects whose details cannot be fetched are dropped
    pub async fn enrich(&self, prospects: Vec<Prospect>, context: &UserContext) -> Vec<EnrichedProspect> {
        let total = prospects.len();
        let mut enriched = Vec::with_capacity(total);

        for prospect in prospects {
            let Some(details) = self
                .catalog
                .get_details(prospect.id, prospect.kind, context.locale())
                .await
            else {
                tracing::warn!(key = %prospect.key(), title = %prospect.title, "Dropping prospect without details");
                continue;
            };

            let certification = certification_for(prospect.kind, &details, context.country());
            enriched.push(EnrichedProspect {
                prospect,
                genres: details.genres,
                vote_average: details.vote_average,
                vote_count: details.vote_count,
                certification,
            });
        }

        tracing::info!(enriched = enriched.len(), dropped = total - enriched.len(), "Details attached");
        enriched
    }
}

/// Extracts the certification for `country`, or [`NOT_RATED`] when none applies
pub fn certification_for(kind: MediaKind, details: &CatalogDetails, country: &str) -> String {
    let found = match kind {
        MediaKind::Movie => details
            .release_dates
            .iter()
            .find(|entry| entry.country.eq_ignore_ascii_case(country))
            .and_then(|entry| {
                entry
                    .releases
                    .iter()
                    .filter(|r| r.release_type.is_some_and(|t| RATED_RELEASE_TYPES.contains(&t)))
                    .map(|r| r.certification.trim())
                    .find(|c| !c.is_empty())
            }),
        MediaKind::Series => details
            .content_ratings
            .iter()
            .filter(|entry| entry.country.eq_ignore_ascii_case(country))
            .map(|entry| entry.rating.trim())
            .find(|rating| !rating.is_empty()),
    };

    found.unwrap_or(NOT_RATED).to_string()
}
