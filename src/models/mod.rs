use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

pub mod genre;
pub mod prospect;
pub mod streaming_service;
pub mod user_context;

pub use prospect::{
    AvailableProspect, EnrichedProspect, Prospect, Recommendation, RecommendationReport,
    SelectedProspect, NOT_RATED,
};
pub use streaming_service::ProviderDirectory;
pub use user_context::UserContext;

/// Kind of title in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Both kinds, in the order discovery queries them
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Series];

    /// Path segment the catalog uses for this kind
    pub fn catalog_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    pub fn from_catalog(media_type: &str) -> Option<Self> {
        match media_type {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// Identity of a prospect
///
/// Catalog ids are only unique within a kind, so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProspectKey {
    pub id: u64,
    pub kind: MediaKind,
}

impl Display for ProspectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// ============================================================================
// Catalog capability shapes
// ============================================================================

/// A search or discovery hit as seen by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub popularity: f64,
}

/// Kind-specific details plus the regional certification records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDetails {
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    /// Movie release records, one entry per country
    pub release_dates: Vec<CountryReleases>,
    /// Series content ratings, one entry per country
    pub content_ratings: Vec<CountryRating>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryReleases {
    pub country: String,
    pub releases: Vec<ReleaseRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRecord {
    pub certification: String,
    pub release_type: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRating {
    pub country: String,
    pub rating: String,
}

/// Watch providers keyed by country code
pub type WatchProviders = HashMap<String, CountryProviders>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryProviders {
    /// Subscription offers
    pub flatrate: Vec<ProviderOffer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderOffer {
    pub provider_id: u32,
    pub provider_name: String,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// One page of TMDb results
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Result row from /search/multi or /discover/{kind}
///
/// Movies carry `title`, series carry `name`; discovery rows have no `media_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl ApiListItem {
    /// Converts a row into a catalog item, using `kind` when the row has no media type.
    ///
    /// Returns `None` for rows that are neither movies nor series (e.g. people).
    pub fn into_catalog_item(self, kind: Option<MediaKind>) -> Option<CatalogItem> {
        let kind = match self.media_type.as_deref() {
            Some(media_type) => MediaKind::from_catalog(media_type)?,
            None => kind?,
        };

        let title = match kind {
            MediaKind::Movie => self.title.or(self.name),
            MediaKind::Series => self.name.or(self.title),
        };

        Some(CatalogItem {
            id: self.id.unwrap_or(0),
            kind,
            title: title.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            popularity: self.popularity.unwrap_or(0.0),
        })
    }
}

/// Response from GET /{kind}/{id} with release_dates or content_ratings appended
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDetails {
    #[serde(default)]
    pub genres: Vec<ApiGenre>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub release_dates: Option<ApiPage<ApiReleaseCountry>>,
    #[serde(default)]
    pub content_ratings: Option<ApiPage<ApiContentRating>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReleaseCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ApiReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReleaseDate {
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(rename = "type", default)]
    pub release_type: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiContentRating {
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: Option<String>,
}

impl From<ApiDetails> for CatalogDetails {
    fn from(details: ApiDetails) -> Self {
        let release_dates = details
            .release_dates
            .map(|page| page.results)
            .unwrap_or_default()
            .into_iter()
            .map(|country| CountryReleases {
                country: country.iso_3166_1,
                releases: country
                    .release_dates
                    .into_iter()
                    .map(|release| ReleaseRecord {
                        certification: release.certification.unwrap_or_default(),
                        release_type: release.release_type,
                    })
                    .collect(),
            })
            .collect();

        let content_ratings = details
            .content_ratings
            .map(|page| page.results)
            .unwrap_or_default()
            .into_iter()
            .map(|rating| CountryRating {
                country: rating.iso_3166_1,
                rating: rating.rating.unwrap_or_default(),
            })
            .collect();

        CatalogDetails {
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            vote_average: details.vote_average.unwrap_or(0.0),
            vote_count: details.vote_count.unwrap_or(0),
            release_dates,
            content_ratings,
        }
    }
}

/// Response from GET /{kind}/{id}/watch/providers
#[derive(Debug, Clone, Deserialize)]
pub struct ApiWatchProviders {
    #[serde(default)]
    pub results: HashMap<String, ApiCountryProviders>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountryProviders {
    #[serde(default)]
    pub flatrate: Vec<ApiProviderOffer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProviderOffer {
    pub provider_id: u32,
    pub provider_name: String,
}

impl From<ApiWatchProviders> for WatchProviders {
    fn from(providers: ApiWatchProviders) -> Self {
        providers
            .results
            .into_iter()
            .map(|(country, offers)| {
                let flatrate = offers
                    .flatrate
                    .into_iter()
                    .map(|offer| ProviderOffer {
                        provider_id: offer.provider_id,
                        provider_name: offer.provider_name,
                    })
                    .collect();
                (country, CountryProviders { flatrate })
            })
            .collect()
    }
}
