use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MediaKind, ProspectKey, UserContext};

/// Certification used when the catalog has no usable rating for the target country
pub const NOT_RATED: &str = "NOT RATED";

/// A candidate title as surfaced by discovery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prospect {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub popularity: f64,
}

impl Prospect {
    pub fn key(&self) -> ProspectKey {
        ProspectKey {
            id: self.id,
            kind: self.kind,
        }
    }
}

/// A prospect with details and the country-specific certification attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedProspect {
    #[serde(flatten)]
    pub prospect: Prospect,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub certification: String,
}

/// An enriched prospect tagged with the user's platforms it streams on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableProspect {
    #[serde(flatten)]
    pub enriched: EnrichedProspect,
    /// Sorted, deduplicated provider names; empty when not streaming on any preferred platform
    pub platforms: Vec<String>,
}

impl AvailableProspect {
    pub fn title(&self) -> &str {
        &self.enriched.prospect.title
    }

    pub fn popularity(&self) -> f64 {
        self.enriched.prospect.popularity
    }

    pub fn certification(&self) -> &str {
        &self.enriched.certification
    }
}

/// A candidate that survived suitability filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedProspect {
    #[serde(flatten)]
    pub candidate: AvailableProspect,
    /// Set when discovery had to fall back to generic age-banded genres
    pub via_fallback: bool,
}

/// Final recommendation record handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub selection: SelectedProspect,
    pub justification: String,
}

impl Recommendation {
    pub fn item(&self) -> &AvailableProspect {
        &self.selection.candidate
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub age: u8,
    pub interests: String,
    pub country: String,
    pub recommendations: Vec<Recommendation>,
    pub fallback_engaged: bool,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationReport {
    pub fn new(context: &UserContext, recommendations: Vec<Recommendation>, fallback_engaged: bool) -> Self {
        Self {
            age: context.age(),
            interests: context.interests().to_string(),
            country: context.country().to_string(),
            recommendations,
            fallback_engaged,
            generated_at: Utc::now(),
        }
    }

    /// Report for a run that found nothing
    pub fn empty(context: &UserContext) -> Self {
        Self::new(context, Vec::new(), false)
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvailableProspect {
        AvailableProspect {
            enriched: EnrichedProspect {
                prospect: Prospect {
                    id: 10193,
                    kind: MediaKind::Movie,
                    title: "Toy Story 3".to_string(),
                    overview: "Woody, Buzz and the gang face daycare.".to_string(),
                    popularity: 61.2,
                },
                genres: vec!["Animation".to_string()],
                vote_average: 7.8,
                vote_count: 15000,
                certification: "L".to_string(),
            },
            platforms: vec!["Disney Plus".to_string()],
        }
    }

    #[test]
    fn test_prospect_key() {
        let candidate = sample();
        let key = candidate.enriched.prospect.key();
        assert_eq!(key.id, 10193);
        assert_eq!(key.kind, MediaKind::Movie);
    }

    #[test]
    fn test_recommendation_serializes_flat() {
        let recommendation = Recommendation {
            selection: SelectedProspect {
                candidate: sample(),
                via_fallback: true,
            },
            justification: "Great pick.".to_string(),
        };

        let json = serde_json::to_value(&recommendation).unwrap();
        assert_eq!(json["title"], "Toy Story 3");
        assert_eq!(json["kind"], "movie");
        assert_eq!(json["certification"], "L");
        assert_eq!(json["platforms"][0], "Disney Plus");
        assert_eq!(json["via_fallback"], true);
        assert_eq!(json["justification"], "Great pick.");
    }
}
