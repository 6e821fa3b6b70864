use crate::models::{AvailableProspect, SelectedProspect, UserContext};

/// Markers the catalog uses for "no rating on record"
const UNRATED_MARKERS: [&str; 4] = ["", "N/A", "NOT RATED", "UNRATED"];

/// Brazilian age-restricted ratings and the minimum age each requires
const BR_AGE_RATINGS: [(&str, u8); 5] = [("10", 10), ("12", 12), ("14", 14), ("16", 16), ("18", 18)];

/// Whether a certification is acceptable for a viewer of `age` in `country`
///
/// Unrated titles are always admitted. Only Brazil's rating scheme is interpreted;
/// any rating from another country is treated as unsuitable.
pub fn is_age_appropriate(certification: &str, age: u8, country: &str) -> bool {
    let certification = certification.trim().to_uppercase();
    if UNRATED_MARKERS.contains(&certification.as_str()) {
        return true;
    }

    if !country.eq_ignore_ascii_case("BR") {
        return false;
    }

    if certification == "L" || certification.starts_with("AL") {
        return true;
    }

    BR_AGE_RATINGS
        .iter()
        .find(|(rating, _)| *rating == certification)
        .is_some_and(|(_, minimum)| age >= *minimum)
}

/// Keeps streamable, age-appropriate candidates and picks the most popular
#[derive(Debug, Clone, Copy)]
pub struct SuitabilitySelector {
    limit: usize,
}

impl SuitabilitySelector {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn select(
        &self,
        candidates: Vec<AvailableProspect>,
        context: &UserContext,
        fallback_engaged: bool,
    ) -> Vec<SelectedProspect> {
        let total = candidates.len();
        let mut suitable: Vec<AvailableProspect> = candidates
            .into_iter()
            .filter(|c| !c.platforms.is_empty())
            .filter(|c| {
                let ok = is_age_appropriate(c.certification(), context.age(), context.country());
                if !ok {
                    tracing::debug!(title = %c.title(), certification = %c.certification(), "Rejected for age");
                }
                ok
            })
            .collect();

        suitable.sort_by(|a, b| b.popularity().total_cmp(&a.popularity()));
        suitable.truncate(self.limit);

        tracing::info!(candidates = total, selected = suitable.len(), "Suitability filter applied");

        suitable
            .into_iter()
            .map(|candidate| SelectedProspect {
                candidate,
                via_fallback: fallback_engaged,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrichedProspect, MediaKind, Prospect};

    fn candidate(id: u64, popularity: f64, certification: &str, platforms: &[&str]) -> AvailableProspect {
        AvailableProspect {
            enriched: EnrichedProspect {
                prospect: Prospect {
                    id,
                    kind: MediaKind::Movie,
                    title: format!("Title {}", id),
                    overview: "A long enough overview.".to_string(),
                    popularity,
                },
                genres: Vec::new(),
                vote_average: 7.0,
                vote_count: 100,
                certification: certification.to_string(),
            },
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn context(age: u32, country: &str) -> UserContext {
        UserContext::new(age, "space", ["netflix"], country, "pt-BR").unwrap()
    }

    #[test]
    fn test_brazilian_ratings() {
        assert!(is_age_appropriate("L", 5, "BR"));
        assert!(is_age_appropriate("AL", 5, "BR"));
        assert!(is_age_appropriate("10", 10, "BR"));
        assert!(!is_age_appropriate("10", 9, "BR"));
        assert!(!is_age_appropriate("12", 10, "BR"));
        assert!(!is_age_appropriate("16", 15, "BR"));
        assert!(is_age_appropriate("16", 16, "BR"));
        assert!(is_age_appropriate("18", 18, "BR"));
        assert!(!is_age_appropriate("PG", 12, "BR"));
    }

    #[test]
    fn test_unrated_markers_always_pass() {
        for marker in ["", "  ", "N/A", "not rated", "Unrated", "NOT RATED"] {
            assert!(is_age_appropriate(marker, 4, "BR"), "{marker:?}");
            assert!(is_age_appropriate(marker, 4, "US"), "{marker:?}");
        }
    }

    #[test]
    fn test_other_countries_reject_any_rating() {
        assert!(!is_age_appropriate("G", 10, "US"));
        assert!(!is_age_appropriate("L", 10, "PT"));
    }

    #[test]
    fn test_select_filters_sorts_and_truncates() {
        let candidates = vec![
            candidate(1, 20.0, "L", &["Netflix"]),
            candidate(2, 90.0, "L", &[]),
            candidate(3, 50.0, "14", &["Netflix"]),
            candidate(4, 40.0, "10", &["Netflix"]),
            candidate(5, 30.0, "NOT RATED", &["Disney Plus"]),
        ];

        let selected = SuitabilitySelector::new(2).select(candidates, &context(10, "BR"), true);

        let ids: Vec<u64> = selected.iter().map(|s| s.candidate.enriched.prospect.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert!(selected.iter().all(|s| s.via_fallback));
    }

    #[test]
    fn test_select_is_idempotent() {
        let candidates = vec![
            candidate(1, 20.0, "L", &["Netflix"]),
            candidate(2, 20.0, "", &["Netflix"]),
            candidate(3, 50.0, "12", &["Netflix"]),
        ];
        let selector = SuitabilitySelector::new(3);
        let ctx = context(8, "BR");

        let once = selector.select(candidates, &ctx, false);
        let again = selector.select(once.iter().map(|s| s.candidate.clone()).collect(), &ctx, false);

        assert_eq!(once, again);
        let ids: Vec<u64> = once.iter().map(|s| s.candidate.enriched.prospect.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_select_empty() {
        let selected = SuitabilitySelector::new(2).select(Vec::new(), &context(8, "BR"), false);
        assert!(selected.is_empty());
    }
}
