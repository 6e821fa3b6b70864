use std::collections::{BTreeSet, HashSet};

use crate::{
    models::{AvailableProspect, EnrichedProspect, ProviderDirectory, UserContext, WatchProviders},
    services::catalog::CatalogClient,
};

/// Tags each prospect with the user's platforms it streams on by subscription
#[derive(Clone)]
pub struct AvailabilityFilter {
    catalog: CatalogClient,
    directory: ProviderDirectory,
}

impl AvailabilityFilter {
    pub fn new(catalog: CatalogClient, directory: ProviderDirectory) -> Self {
        Self { catalog, directory }
    }

    /// Returns every prospect, in order, with its matching platform names
    ///
    /// Prospects that stream nowhere the user subscribes get an empty list; removing
    /// them is the selector's job.
    pub async fn tag(&self, prospects: Vec<EnrichedProspect>, context: &UserContext) -> Vec<AvailableProspect> {
        let wanted: HashSet<u32> = context
            .platforms()
            .iter()
            .filter_map(|name| {
                let resolved = self.directory.resolve(name);
                if resolved.is_none() {
                    tracing::debug!(platform = %name, "Unknown streaming platform ignored");
                }
                resolved
            })
            .collect();

        if wanted.is_empty() {
            tracing::info!(count = prospects.len(), "No known platforms, skipping availability lookups");
            return prospects
                .into_iter()
                .map(|enriched| AvailableProspect {
                    enriched,
                    platforms: Vec::new(),
                })
                .collect();
        }

        let mut tagged = Vec::with_capacity(prospects.len());
        for enriched in prospects {
            let platforms = self
                .catalog
                .get_watch_providers(enriched.prospect.id, enriched.prospect.kind)
                .await
                .map(|providers| matching_platforms(&providers, context.country(), &wanted))
                .unwrap_or_default();

            tracing::debug!(title = %enriched.prospect.title, platforms = ?platforms, "Availability resolved");
            tagged.push(AvailableProspect { enriched, platforms });
        }

        let streaming = tagged.iter().filter(|p| !p.platforms.is_empty()).count();
        tracing::info!(total = tagged.len(), streaming = streaming, "Availability tagged");

        tagged
    }
}

/// Subscription provider names in `country` whose id is wanted, sorted and deduplicated
fn matching_platforms(providers: &WatchProviders, country: &str, wanted: &HashSet<u32>) -> Vec<String> {
    let Some(offers) = providers.get(country) else {
        return Vec::new();
    };

    offers
        .flatrate
        .iter()
        .filter(|offer| wanted.contains(&offer.provider_id))
        .map(|offer| offer.provider_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
