use indexmap::IndexMap;

use crate::{
    models::{genre, CatalogItem, MediaKind, Prospect, ProspectKey, UserContext},
    services::{catalog::CatalogClient, interest_expander::InterestExpander, providers::DiscoverQuery},
};

/// Upper bound on candidates kept by discovery
pub const MAX_CANDIDATES: usize = 30;
/// Distinct phrases tried in direct search, the original query included
pub const MAX_SEARCH_PHRASES: usize = 3;
pub const PAGES_PER_QUERY: u32 = 2;
/// Overviews this short or shorter mark stub catalog entries
pub const MIN_OVERVIEW_CHARS: usize = 10;

/// Genre-hinted discovery runs when direct search found fewer than this
pub const GENRE_HINT_THRESHOLD: usize = 15;
pub const GENRE_HINT_MIN_VOTES: u32 = 20;
/// Age-banded fallback runs when the set still holds fewer than this
pub const FALLBACK_THRESHOLD: usize = 10;
pub const FALLBACK_MIN_VOTES: u32 = 50;
/// Fallback counts as the dominant source when direct search found fewer than this
pub const FALLBACK_SIGNAL_THRESHOLD: usize = 5;

/// Prospects keyed by identity, accumulated across discovery stages
///
/// The first record seen for a key wins; later stages never overwrite it.
#[derive(Debug, Default)]
pub struct CandidateSet {
    prospects: IndexMap<ProspectKey, Prospect>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the prospect unless its key is already present; returns whether it was added
    pub fn insert_if_absent(&mut self, prospect: Prospect) -> bool {
        match self.prospects.entry(prospect.key()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(prospect);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.prospects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prospects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.prospects.len() >= MAX_CANDIDATES
    }

    /// Sorts by popularity descending (stable on insertion order) and truncates
    pub fn into_ranked(self, limit: usize) -> Vec<Prospect> {
        let mut ranked: Vec<Prospect> = self.prospects.into_values().collect();
        ranked.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        ranked.truncate(limit);
        ranked
    }
}

/// Result of a discovery run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovery {
    pub candidates: Vec<Prospect>,
    /// Generic age-banded genres likely dominate the candidates
    pub fallback_engaged: bool,
}

impl Discovery {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Mutable state of a single discovery run
struct DiscoveryRun {
    candidates: CandidateSet,
    /// Set once any catalog call returned data, even an empty page
    reached_catalog: bool,
}

impl DiscoveryRun {
    /// Adds admissible items from one page; returns how many rows the page had
    fn absorb(&mut self, page: Option<Vec<CatalogItem>>) -> usize {
        let Some(items) = page else {
            return 0;
        };
        self.reached_catalog = true;

        let rows = items.len();
        for item in items {
            let key = ProspectKey {
                id: item.id,
                kind: item.kind,
            };
            match admit(item) {
                Some(prospect) => {
                    if !self.candidates.insert_if_absent(prospect) {
                        tracing::trace!(key = %key, "Duplicate prospect ignored");
                    }
                }
                None => tracing::debug!(key = %key, "Rejected incomplete catalog entry"),
            }
        }
        rows
    }
}

/// Accepts an item only if it has an id, a title and a real overview
fn admit(item: CatalogItem) -> Option<Prospect> {
    let title = item.title.trim();
    let overview = item.overview.trim();
    if item.id == 0 || title.is_empty() || overview.chars().count() <= MIN_OVERVIEW_CHARS {
        return None;
    }

    Some(Prospect {
        id: item.id,
        kind: item.kind,
        title: title.to_string(),
        overview: overview.to_string(),
        popularity: item.popularity,
    })
}

/// The original query followed by distinct alternates, capped
fn search_phrases(original: &str, alternates: &[String]) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::with_capacity(MAX_SEARCH_PHRASES);
    for phrase in std::iter::once(original).chain(alternates.iter().map(String::as_str)) {
        let phrase = phrase.trim();
        if phrase.is_empty() || phrases.iter().any(|p| p.eq_ignore_ascii_case(phrase)) {
            continue;
        }
        phrases.push(phrase.to_string());
        if phrases.len() == MAX_SEARCH_PHRASES {
            break;
        }
    }
    phrases
}

/// Builds a candidate list from vague input through staged search strategies
///
/// Stages, each gated on the weakness of what came before:
/// 1. interest expansion into alternate phrases and genre hints
/// 2. direct multi-kind text search per phrase
/// 3. genre-hinted discovery, only with hints and a thin direct result
/// 4. age-banded generic genres, only when the set is still small
#[derive(Clone)]
pub struct ProspectDiscoveryEngine {
    catalog: CatalogClient,
    expander: InterestExpander,
}

impl ProspectDiscoveryEngine {
    pub fn new(catalog: CatalogClient, expander: InterestExpander) -> Self {
        Self { catalog, expander }
    }

    pub async fn discover(&self, context: &UserContext) -> Discovery {
        if !self.catalog.is_available() {
            tracing::warn!("Catalog unavailable, skipping discovery");
            return Discovery::empty();
        }

        let expansion = self
            .expander
            .expand(context.interests(), context.age(), context.country())
            .await;

        let mut run = DiscoveryRun {
            candidates: CandidateSet::new(),
            reached_catalog: false,
        };

        for phrase in search_phrases(context.interests(), &expansion.phrases) {
            if run.candidates.is_full() {
                break;
            }
            self.search_phrase(context, &phrase, &mut run).await;
        }

        let direct_count = run.candidates.len();
        tracing::info!(candidates = direct_count, "Direct search completed");

        if direct_count < GENRE_HINT_THRESHOLD && !expansion.genre_hints.is_empty() {
            self.discover_genres(context, &expansion.genre_hints, GENRE_HINT_MIN_VOTES, &mut run)
                .await;
            tracing::info!(
                candidates = run.candidates.len(),
                genres = ?expansion.genre_hints,
                "Genre-hinted discovery completed"
            );
        }

        let mut fallback_engaged = false;
        if run.candidates.len() < FALLBACK_THRESHOLD {
            let genres = genre::age_band_genres(context.age());
            self.discover_genres(context, genres, FALLBACK_MIN_VOTES, &mut run)
                .await;
            fallback_engaged = direct_count < FALLBACK_SIGNAL_THRESHOLD;
            tracing::info!(
                candidates = run.candidates.len(),
                genres = ?genres,
                fallback_engaged = fallback_engaged,
                "Age-banded fallback completed"
            );
        }

        if !run.reached_catalog {
            tracing::warn!("Every catalog call failed, treating catalog as unreachable");
            return Discovery::empty();
        }

        let candidates = run.candidates.into_ranked(MAX_CANDIDATES);
        if candidates.is_empty() {
            tracing::warn!(query = %context.interests(), "No prospects found after all strategies");
        }

        Discovery {
            candidates,
            fallback_engaged,
        }
    }

    async fn search_phrase(&self, context: &UserContext, phrase: &str, run: &mut DiscoveryRun) {
        for page in 1..=PAGES_PER_QUERY {
            if run.candidates.is_full() {
                return;
            }
            let results = self
                .catalog
                .search_multi(phrase, context.locale(), context.country(), page)
                .await;
            if run.absorb(results) == 0 {
                return;
            }
        }
    }

    async fn discover_genres(
        &self,
        context: &UserContext,
        genre_ids: &[u32],
        min_vote_count: u32,
        run: &mut DiscoveryRun,
    ) {
        for kind in MediaKind::ALL {
            for page in 1..=PAGES_PER_QUERY {
                if run.candidates.is_full() {
                    return;
                }
                let query = DiscoverQuery {
                    genre_ids: genre_ids.to_vec(),
                    kind,
                    locale: context.locale().to_string(),
                    country: context.country().to_string(),
                    sort_by_popularity: true,
                    min_vote_count,
                    page,
                };
                if run.absorb(self.catalog.discover_by_genre(query).await) == 0 {
                    break;
                }
            }
        }
    }
}
